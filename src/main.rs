//! stars-graph: Classify starred repositories into topical categories
//!
//! Reads a dump of starred repository records, assigns each one a category
//! with a tiered keyword rule table, and exports the data file and graph
//! view consumed by the browser front-end.

use anyhow::Result;

fn main() -> Result<()> {
    stars_graph::cli::run()
}
