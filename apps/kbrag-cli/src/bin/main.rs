use std::env;
use std::io::Write;
use std::num::NonZeroUsize;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use kbrag_core::config::{Config, SourcesConfig};
use kbrag_core::error::Error;
use kbrag_core::types::{Answer, DocKind};
use kbrag_engine::{Engine, QueryOptions};

fn parse_args() -> (String, Vec<String>) {
    let mut args: Vec<String> = env::args().collect();
    let prog = args.remove(0);
    if args.is_empty() { eprintln!("Usage: {} <query|repl|stats> [args...]", prog); std::process::exit(1); }
    let cmd = args.remove(0);
    (cmd, args)
}

struct QueryArgs {
    text: String,
    k: Option<NonZeroUsize>,
    json: bool,
}

fn parse_query_args(args: &[String]) -> anyhow::Result<QueryArgs> {
    let mut out = QueryArgs { text: String::new(), k: None, json: false };
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--k" => {
                let raw = args.get(i + 1).ok_or_else(|| anyhow::anyhow!("--k requires a number"))?;
                let k: usize = raw.parse().map_err(|e| anyhow::anyhow!("invalid --k '{}': {}", raw, e))?;
                out.k = Some(NonZeroUsize::new(k).ok_or_else(|| anyhow::anyhow!("--k must be at least 1"))?);
                i += 2; continue;
            }
            "--json" => { out.json = true; i += 1; continue; }
            s if s.starts_with("--") => anyhow::bail!("Unknown flag: {}", s),
            s => {
                if out.text.is_empty() { out.text = s.to_string(); } else { out.text.push(' '); out.text.push_str(s); }
                i += 1; continue;
            }
        }
    }
    Ok(out)
}

async fn load_engine(sources: &SourcesConfig) -> anyhow::Result<Engine> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    spinner.set_message(format!("Loading {} and {}", sources.business_csv.display(), sources.faq_csv.display()));
    spinner.enable_steady_tick(Duration::from_millis(100));
    let engine = Engine::init(sources).await.map_err(Error::from);
    spinner.finish_and_clear();
    Ok(engine?)
}

fn print_answer(answer: &Answer, json: bool) -> anyhow::Result<()> {
    if json { println!("{}", serde_json::to_string_pretty(answer)?); return Ok(()); }
    println!("{}", answer.answer);
    if !answer.sources.is_empty() { println!("\nSources: {}", answer.sources.join(" | ")); }
    Ok(())
}

async fn repl(sources: &SourcesConfig, options: QueryOptions) -> anyhow::Result<()> {
    let mut engine = load_engine(sources).await?;
    println!("kbrag ready ({} documents). Type a question, :reload or :quit.", engine.index().doc_count());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else { break };
        match line.trim() {
            "" => continue,
            ":quit" | ":q" => break,
            ":reload" => match load_engine(sources).await {
                // The previous engine keeps serving if the reload fails.
                Ok(fresh) => { engine = fresh; println!("Reloaded ({} documents).", engine.index().doc_count()); }
                Err(e) => eprintln!("Reload failed: {:#}", e),
            },
            q => print_answer(&engine.query(q, options), false)?,
        }
    }
    Ok(())
}

fn print_stats(engine: &Engine) {
    let index = engine.index();
    let count = |kind: DocKind| index.documents().filter(|d| d.kind() == kind).count();
    println!("documents:  {}", index.doc_count());
    println!("  business: {}", count(DocKind::Business));
    println!("  faq:      {}", count(DocKind::Faq));
    println!("vocabulary: {} terms", index.vocabulary_size());
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("kbrag=info")))
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load().map_err(|e| { eprintln!("Error loading config: {}", e); e })?;
    let (cmd, args) = parse_args();
    let sources = config.sources()?;
    match cmd.as_str() {
        "query" => {
            let q = parse_query_args(&args)?;
            if q.text.is_empty() { eprintln!("Usage: kbrag query \"<question>\" [--k N] [--json]"); std::process::exit(1); }
            let k = match q.k { Some(k) => k, None => config.top_k()? };
            let engine = load_engine(&sources).await?;
            print_answer(&engine.query(&q.text, QueryOptions::new(k)), q.json)?;
        }
        "repl" => repl(&sources, QueryOptions::new(config.top_k()?)).await?,
        "stats" => print_stats(&load_engine(&sources).await?),
        _ => { eprintln!("Unknown command: {}", cmd); std::process::exit(1); }
    }
    Ok(())
}
