//! 리포트 도메인 모델.
//!
//! 모든 레코드는 매 실행마다 새로 수집/계산되는 일시적 데이터입니다.
//! 실행 간 유지되는 것은 렌더링된 마크다운과 차트 이미지뿐입니다.

pub mod buffett;
pub mod calendar;
pub mod forex;
pub mod market;
pub mod news;
pub mod options;
pub mod treasury;

pub use buffett::{BuffettStatus, MarketStatus};
pub use calendar::EconomicEvent;
pub use forex::ForexPoint;
pub use market::{DailyBar, MarketQuote};
pub use news::{NewsDigest, NewsItem};
pub use options::{
    OptionAnalysis, OptionChain, OptionContract, OptionSignal, PutCallRatios, SkewAnalysis,
    SkewTrend, TermPoint, TermStructure, TermTrend,
};
pub use treasury::TreasuryPoint;
