//! 客户端：HTTP 调用与单页视图状态

pub mod api;
pub mod view;

pub use api::{ClientError, WordsClient};
pub use view::{Notice, ViewState, WordsView};
