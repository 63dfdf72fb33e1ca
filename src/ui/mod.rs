pub mod pager;
pub mod theme;
