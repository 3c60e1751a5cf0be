pub mod config;
pub mod dispatch;
pub mod history;
pub mod news;
pub mod providers;
pub mod research;
pub mod run;
pub mod weather;
