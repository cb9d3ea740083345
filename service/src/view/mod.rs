//! Client-side views over fetched rows: filtering, tabulation and paging.

pub mod filter;
pub mod filters;
pub mod table;

pub use self::{
    filter::{Filter, FilterOption},
    table::{Column, Pager, Table},
};
