pub mod confirm_dialog;
pub mod history_card;
pub mod record_controls;
pub mod review_controls;
pub mod screen_header;

pub use confirm_dialog::confirm_content;
pub use history_card::{HistoryCard, HistoryCardAction};
pub use record_controls::{RecordAction, RecordControls};
pub use review_controls::{ReviewAction, ReviewControls};
pub use screen_header::{HeaderAction, ScreenHeader};
