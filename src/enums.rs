/// Wire-value enums for Backpack Exchange API fields.
///
/// Each enum converts to its wire string through `as_str` exactly once at
/// the request boundary; endpoint methods accept the enum, never a raw
/// string.
use std::fmt;

macro_rules! impl_display {
    ($($name:ident),+ $(,)?) => {
        $(impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })+
    };
}

/// Order side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Bid,
    Ask,
}

impl Side {
    pub fn as_str(self) -> &'static str {
        match self {
            Side::Bid => "Bid",
            Side::Ask => "Ask",
        }
    }
}

/// Order type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderType {
    Market,
    Limit,
}

impl OrderType {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderType::Market => "Market",
            OrderType::Limit => "Limit",
        }
    }
}

/// How long an order remains valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeInForce {
    Gtc,
    Ioc,
    Fok,
}

impl TimeInForce {
    pub fn as_str(self) -> &'static str {
        match self {
            TimeInForce::Gtc => "GTC",
            TimeInForce::Ioc => "IOC",
            TimeInForce::Fok => "FOK",
        }
    }
}

/// Self-trade prevention mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelfTradePrevention {
    RejectTaker,
    RejectMaker,
    RejectBoth,
    Allow,
}

impl SelfTradePrevention {
    pub fn as_str(self) -> &'static str {
        match self {
            SelfTradePrevention::RejectTaker => "RejectTaker",
            SelfTradePrevention::RejectMaker => "RejectMaker",
            SelfTradePrevention::RejectBoth => "RejectBoth",
            SelfTradePrevention::Allow => "Allow",
        }
    }
}

/// Market type filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarketType {
    Spot,
    Perp,
    Iperp,
    Dated,
    Prediction,
    Rfq,
}

impl MarketType {
    pub fn as_str(self) -> &'static str {
        match self {
            MarketType::Spot => "SPOT",
            MarketType::Perp => "PERP",
            MarketType::Iperp => "IPERP",
            MarketType::Dated => "DATED",
            MarketType::Prediction => "PREDICTION",
            MarketType::Rfq => "RFQ",
        }
    }
}

/// Which open orders a cancel-all applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelOrderType {
    RestingLimitOrder,
    ConditionalOrder,
}

impl CancelOrderType {
    pub fn as_str(self) -> &'static str {
        match self {
            CancelOrderType::RestingLimitOrder => "RestingLimitOrder",
            CancelOrderType::ConditionalOrder => "ConditionalOrder",
        }
    }
}

/// Ticker statistics interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickerInterval {
    OneDay,
    OneWeek,
}

impl TickerInterval {
    pub fn as_str(self) -> &'static str {
        match self {
            TickerInterval::OneDay => "1d",
            TickerInterval::OneWeek => "1w",
        }
    }
}

/// K-line (candlestick) interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KlineInterval {
    OneMinute,
    ThreeMinutes,
    FiveMinutes,
    FifteenMinutes,
    ThirtyMinutes,
    OneHour,
    TwoHours,
    FourHours,
    SixHours,
    EightHours,
    TwelveHours,
    OneDay,
    OneWeek,
    OneMonth,
}

impl KlineInterval {
    pub fn as_str(self) -> &'static str {
        match self {
            KlineInterval::OneMinute => "1m",
            KlineInterval::ThreeMinutes => "3m",
            KlineInterval::FiveMinutes => "5m",
            KlineInterval::FifteenMinutes => "15m",
            KlineInterval::ThirtyMinutes => "30m",
            KlineInterval::OneHour => "1h",
            KlineInterval::TwoHours => "2h",
            KlineInterval::FourHours => "4h",
            KlineInterval::SixHours => "6h",
            KlineInterval::EightHours => "8h",
            KlineInterval::TwelveHours => "12h",
            KlineInterval::OneDay => "1d",
            KlineInterval::OneWeek => "1w",
            KlineInterval::OneMonth => "1month",
        }
    }
}

/// Sort direction for history queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "Asc",
            SortDirection::Desc => "Desc",
        }
    }
}

/// Borrow/lend operation side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorrowLendSide {
    Borrow,
    Lend,
}

impl BorrowLendSide {
    pub fn as_str(self) -> &'static str {
        match self {
            BorrowLendSide::Borrow => "Borrow",
            BorrowLendSide::Lend => "Lend",
        }
    }
}

/// Fill type filter for fill history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillType {
    User,
    BookLiquidation,
    Adl,
    Backstop,
    Liquidation,
    AllLiquidation,
    CollateralConversion,
}

impl FillType {
    pub fn as_str(self) -> &'static str {
        match self {
            FillType::User => "User",
            FillType::BookLiquidation => "BookLiquidation",
            FillType::Adl => "Adl",
            FillType::Backstop => "Backstop",
            FillType::Liquidation => "Liquidation",
            FillType::AllLiquidation => "AllLiquidation",
            FillType::CollateralConversion => "CollateralConversion",
        }
    }
}

/// Strategy type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyType {
    Scheduled,
}

impl StrategyType {
    pub fn as_str(self) -> &'static str {
        match self {
            StrategyType::Scheduled => "Scheduled",
        }
    }
}

/// How slippage tolerance is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlippageToleranceType {
    TickSize,
    Percent,
}

impl SlippageToleranceType {
    pub fn as_str(self) -> &'static str {
        match self {
            SlippageToleranceType::TickSize => "TickSize",
            SlippageToleranceType::Percent => "Percent",
        }
    }
}

/// Blockchain networks supported for deposits and withdrawals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Blockchain {
    Aptos,
    Arbitrum,
    Avalanche,
    Base,
    Berachain,
    Bitcoin,
    BitcoinCash,
    Bsc,
    Cardano,
    Cosmos,
    Doge,
    Eclipse,
    Ethereum,
    Hyperliquid,
    Injective,
    Litecoin,
    Monad,
    Near,
    Optimism,
    Polkadot,
    Polygon,
    Ripple,
    Sei,
    Solana,
    Sonic,
    Stellar,
    Sui,
    Ton,
    Tron,
}

impl Blockchain {
    pub fn as_str(self) -> &'static str {
        match self {
            Blockchain::Aptos => "Aptos",
            Blockchain::Arbitrum => "Arbitrum",
            Blockchain::Avalanche => "Avalanche",
            Blockchain::Base => "Base",
            Blockchain::Berachain => "Berachain",
            Blockchain::Bitcoin => "Bitcoin",
            Blockchain::BitcoinCash => "BitcoinCash",
            Blockchain::Bsc => "Bsc",
            Blockchain::Cardano => "Cardano",
            Blockchain::Cosmos => "Cosmos",
            Blockchain::Doge => "Doge",
            Blockchain::Eclipse => "Eclipse",
            Blockchain::Ethereum => "Ethereum",
            Blockchain::Hyperliquid => "Hyperliquid",
            Blockchain::Injective => "Injective",
            Blockchain::Litecoin => "Litecoin",
            Blockchain::Monad => "Monad",
            Blockchain::Near => "Near",
            Blockchain::Optimism => "Optimism",
            Blockchain::Polkadot => "Polkadot",
            Blockchain::Polygon => "Polygon",
            Blockchain::Ripple => "Ripple",
            Blockchain::Sei => "Sei",
            Blockchain::Solana => "Solana",
            Blockchain::Sonic => "Sonic",
            Blockchain::Stellar => "Stellar",
            Blockchain::Sui => "Sui",
            Blockchain::Ton => "Ton",
            Blockchain::Tron => "Tron",
        }
    }
}

impl_display!(
    Side,
    OrderType,
    TimeInForce,
    SelfTradePrevention,
    MarketType,
    CancelOrderType,
    TickerInterval,
    KlineInterval,
    SortDirection,
    BorrowLendSide,
    FillType,
    StrategyType,
    SlippageToleranceType,
    Blockchain,
);
