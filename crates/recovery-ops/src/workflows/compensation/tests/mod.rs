mod common;
mod rate_table;
