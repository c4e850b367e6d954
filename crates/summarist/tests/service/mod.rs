use super::*;

mod engagement;
mod ingest;
mod listing;
mod summaries;
