pub mod query_catalog;
