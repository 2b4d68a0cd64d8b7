pub mod ads;
pub mod calculations;
pub mod currency;
pub mod models;
pub mod screen;

pub use ads::{AdCollaborator, AdError, AdRegion, LoggingAdCollaborator, PlacementId};
pub use calculations::TipCalculator;
pub use currency::{CurrencyFormat, CurrencyFormatter, Locale, LocaleError};
pub use models::{TipBreakdown, TipInputState};
pub use screen::{PercentageRewrite, ScreenEvent, TipScreenModel, TipView};
