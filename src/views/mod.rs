pub mod chat;
pub mod history;
pub mod shared;
pub mod sidebar;
pub mod summarize;

pub use chat::ChatView;
pub use history::HistoryView;
pub use sidebar::ConfigSidebar;
pub use summarize::SummarizeView;
