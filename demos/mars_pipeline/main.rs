//! # Mars Pipeline Demo
//!
//! Walks one query at a time through every stage of the assistant:
//! load → index → classify → retrieve → compose, then assembles the
//! generation prompt and runs the placeholder generator.
//!
//! Uses the offline `HashEmbeddingProvider`, so it needs **no API keys**.
//!
//! Run: `cargo run -p ara-demos --example mars_pipeline`

use std::path::PathBuf;
use std::sync::Arc;

use ara_agent::{KeywordSets, QueryClassifier, compose};
use ara_rag::{
    Corpus, Generator, HashEmbeddingProvider, PlaceholderGenerator, RagConfig, Retriever,
    assemble_context,
};

fn knowledge_path() -> PathBuf {
    std::env::var_os("ARA_KNOWLEDGE_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/../knowledge_base.txt")))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    ara_telemetry::init_with_filter("mars_pipeline", Default::default(), "warn")?;

    // -- 1. Load the knowledge file ---------------------------------------
    let corpus = Corpus::load(knowledge_path()).await?;
    println!("Loaded {} facts.", corpus.len());

    // -- 2. Embed every fact once and build the flat index ----------------
    let config = RagConfig::builder().top_k(3).build()?;
    let threshold = config.similarity_threshold;
    let retriever = Retriever::builder()
        .config(config)
        .embedding_provider(Arc::new(HashEmbeddingProvider::default()))
        .corpus(corpus)
        .build()
        .await?;

    let classifier = QueryClassifier::new(KeywordSets::default(), threshold);

    let queries = [
        "What is Mars also known as and why?",
        "What are the names of the moons of Mars?",
        "What is the distance between Mars and Jupiter?",
        "Hello there",
        "Who are you?",
        "Quarterly earnings forecast",
    ];

    for query in queries {
        println!("\n=== {query}");

        // -- 3. Route the query -------------------------------------------
        let classification = classifier.classify(query, &retriever).await?;
        println!("category: {classification}");

        // -- 4. Nearest facts with their distances ------------------------
        for scored in retriever.retrieve_scored(query, 3).await? {
            println!("  [{:.3}] {}", scored.distance, scored.fact.text);
        }

        // -- 5. Compose the structured answer -----------------------------
        let facts = match classification {
            ara_agent::Classification::TopicMatch => retriever.retrieve(query).await?,
            _ => Vec::new(),
        };
        let response = compose(classification, query, &facts);
        println!("{}", serde_json::to_string_pretty(&response)?);
    }

    // -- 6. The generation prompt for the last topic question --------------
    let query = "What are the names of the moons of Mars?";
    let facts = retriever.retrieve(query).await?;
    let prompt = assemble_context(query, &facts);
    println!("{prompt}");
    println!("{}", PlaceholderGenerator.generate(&prompt).await);

    Ok(())
}
