//! CurAIos command line.
//! Resolves organism, disease and data-type inputs to canonical names and
//! prints the composed repository query as JSON.

mod config;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use serde_json::json;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use curaios_authority::NcbiAuthority;
use curaios_common::{capitalize, EntityKind, ResolvedEntity};
use curaios_core::normalise::validate_generic;
use curaios_core::{
    api_parameters, Adapters, EntityInputs, KnowledgeBase, QueryComposer, QueryRequest,
    ResolvedEntities, Resolver,
};
use curaios_llm::{build_backend, LlmResolver};

use crate::config::Config;

#[derive(Parser, Debug)]
#[command(name = "curaios", about = "Normalise biomedical search terms and compose a dataset query")]
struct Args {
    /// Organism, e.g. "human" or "Mus musculus"
    #[arg(long)]
    organism: Option<String>,

    /// Disease or condition, e.g. "AD" or "breast cancer"
    #[arg(long)]
    disease: Option<String>,

    /// Experimental data type, e.g. "rna-seq" or "chip seq"
    #[arg(long)]
    data_type: Option<String>,

    /// Minimum number of samples
    #[arg(long)]
    min_samples: Option<u32>,

    /// Publication date range, "YYYY-YYYY" or "YYYY-MM-DD:YYYY-MM-DD";
    /// any other value is passed to the query unchanged
    #[arg(long)]
    date_range: Option<String>,

    /// Extra field filter as key=value; may be repeated
    #[arg(long = "filter", value_parser = parse_filter)]
    filters: Vec<(String, String)>,

    /// Keep inputs that fail validation as user overrides instead of aborting
    #[arg(long)]
    raw_fallback: bool,
}

fn parse_filter(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{s}'"))?;
    let key = key.trim();
    if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.') {
        return Err(format!("invalid filter key '{key}'"));
    }
    Ok((key.to_string(), value.trim().to_string()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let config_path = Config::path();
    let loaded = Config::load_from(&config_path)?;
    let config_found = loaded.is_some();
    let mut config = loaded.unwrap_or_default();
    config.apply_env(|name| std::env::var(name).ok());

    // Logs go to stderr; stdout carries the JSON result.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if config_found {
        info!(path = %config_path.display(), "Configuration loaded");
    } else {
        warn!(path = %config_path.display(), "Config file not found; using defaults");
    }

    let llm = Arc::new(LlmResolver::new(
        build_backend(&config.llm),
        config.llm.temperature,
        config.llm.max_tokens,
    ));
    let authority = Arc::new(
        NcbiAuthority::new(&config.ncbi).context("building NCBI client")?,
    );

    let adapters = Adapters { authority, llm: llm.clone() };
    let resolver = Resolver::new(KnowledgeBase::builtin(), adapters, &config.resolver);
    info!(tiers = ?resolver.tier_names(), llm = llm.has_backend(), "Resolver ready");

    let inputs = EntityInputs {
        organism: args.organism,
        disease: args.disease,
        data_type: args.data_type,
    };
    let entities = resolve_inputs(&resolver, &inputs, args.raw_fallback).await?;

    let mut extra_filters = Vec::with_capacity(args.filters.len());
    for (key, value) in args.filters {
        let value = validate_generic(&value)
            .with_context(|| format!("filter '{key}'"))?;
        extra_filters.push((key, value));
    }

    let mut request = QueryRequest::from_entities(entities.clone());
    request.min_samples = args.min_samples;
    request.date_range = args.date_range;
    request.extra_filters = extra_filters;

    let composer = QueryComposer::new(llm, config.resolver.expand_queries);
    let query = composer.compose(&request).await;

    let output = json!({
        "entities": entities,
        "query": query,
        "api_parameters": api_parameters(&query),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

async fn resolve_inputs(
    resolver: &Resolver,
    inputs: &EntityInputs,
    raw_fallback: bool,
) -> anyhow::Result<ResolvedEntities> {
    if !raw_fallback {
        return Ok(resolver.resolve_request(inputs).await?);
    }

    let (organism, disease, data_type) = tokio::join!(
        resolve_or_keep(resolver, inputs.organism.as_deref(), EntityKind::Organism),
        resolve_or_keep(resolver, inputs.disease.as_deref(), EntityKind::Disease),
        resolve_or_keep(resolver, inputs.data_type.as_deref(), EntityKind::DataType),
    );
    Ok(ResolvedEntities { organism, disease, data_type })
}

/// Resolve `raw`; on failure keep the trimmed input as a user override.
async fn resolve_or_keep(
    resolver: &Resolver,
    raw: Option<&str>,
    kind: EntityKind,
) -> Option<ResolvedEntity> {
    let raw = raw?;
    match resolver.resolve(raw, kind).await {
        Ok(entity) => Some(entity),
        Err(e) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return None;
            }
            warn!(kind = %kind, error = %e, "Input rejected; keeping it as a user override");
            Some(ResolvedEntity::user_override(capitalize(trimmed), raw))
        }
    }
}
