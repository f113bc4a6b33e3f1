use std::env;
use std::num::NonZeroUsize;
use std::path::Path;

use kbrag_core::config::SourcesConfig;
use kbrag_engine::Engine;

// Rank the bundled fixture data against a query and print raw hits.
// Usage:
//   cargo run -p kbrag-engine --example ask -- [--k 3] "custody fees"
// Notes:
//   - Reads test_data/business.csv and test_data/faq_kb.csv from the workspace root.

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let mut query = String::new();
    let mut k = NonZeroUsize::MIN.saturating_add(2);
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--k" => {
                if i + 1 >= args.len() { eprintln!("--k requires a number"); std::process::exit(2); }
                k = args[i + 1]
                    .parse::<NonZeroUsize>()
                    .map_err(|e| anyhow::anyhow!("invalid --k '{}': {}", args[i + 1], e))?;
                i += 2; continue;
            }
            s if s.starts_with("--") => {
                eprintln!("Unknown flag: {}", s); std::process::exit(2);
            }
            s => {
                if query.is_empty() { query = s.to_string(); }
                i += 1; continue;
            }
        }
    }
    if query.is_empty() {
        eprintln!("Missing <query> argument");
        std::process::exit(1);
    }

    let base = Path::new(env!("CARGO_MANIFEST_DIR")).ancestors().nth(2).unwrap_or(Path::new("."));
    let sources = SourcesConfig::new(base.join("test_data/business.csv"), base.join("test_data/faq_kb.csv"));

    let engine = Engine::init(&sources).await?;
    println!("Query: {} (k {})\n", query, k);
    for h in engine.search(&query, k) {
        println!("{:>2}. score={:.3} id={} kind={}\n    {}", h.rank, h.score, h.document.id, h.document.kind().as_str(), h.document.text);
    }
    Ok(())
}
