//! End-to-end routing pipeline tests with stubbed collaborators

use async_trait::async_trait;
use cortex_config::{Capability, ModelProfileConfig, RoutingConfig};
use cortex_routing::{
    ChatCompletion, ChatError, RouteRequest, StaticCatalog, select_fim_model, select_model, select_models,
};

/// Chat stub returning a canned extraction response
struct Canned(&'static str);

#[async_trait]
impl ChatCompletion for Canned {
    async fn complete_json(&self, _system: &str, _user: &str) -> Result<String, ChatError> {
        Ok(self.0.to_owned())
    }
}

/// Chat stub simulating a provider outage
struct Outage;

#[async_trait]
impl ChatCompletion for Outage {
    async fn complete_json(&self, _system: &str, _user: &str) -> Result<String, ChatError> {
        Err(ChatError("upstream timed out".to_owned()))
    }
}

fn model(provider: &str, name: &str) -> ModelProfileConfig {
    ModelProfileConfig {
        provider: provider.to_owned(),
        model: name.to_owned(),
        strengths: vec![],
        input_cost_per_1k: None,
        output_cost_per_1k: None,
        context_complexity: None,
        reliability: None,
        speed: None,
        multimodal: false,
        tool_calls: false,
        fim: false,
        next_edit: false,
        apply_edit: false,
    }
}

#[tokio::test]
async fn exact_match_outranks_capability_mismatch() {
    let mut strong = model("openai", "coder");
    strong.strengths = vec![Capability::Coding];
    strong.context_complexity = Some(4);
    strong.reliability = Some(5);
    strong.speed = Some(3);

    let mut weak = model("anthropic", "storyteller");
    weak.strengths = vec![Capability::Creative];
    weak.context_complexity = Some(1);

    let catalog = StaticCatalog::from_config(&[weak, strong]);
    let analysis = r#"{"expectedComplexity": 4, "requiredCapabilities": ["coding"], "needsFunctions": false}"#;

    let selected = select_model(
        &RouteRequest::new("refactor this parser"),
        &Canned(analysis),
        &catalog,
        &RoutingConfig::default(),
    )
    .await;

    assert_eq!(selected, "openai/coder");
}

#[tokio::test]
async fn tight_budget_prefers_the_cheaper_twin() {
    let mut cheap = model("openai", "value");
    cheap.strengths = vec![Capability::Coding];
    cheap.input_cost_per_1k = Some(0.01);
    cheap.output_cost_per_1k = Some(0.01);

    let mut pricey = model("anthropic", "premium");
    pricey.strengths = vec![Capability::Coding];
    pricey.input_cost_per_1k = Some(0.02);
    pricey.output_cost_per_1k = Some(0.02);

    let catalog = StaticCatalog::from_config(&[pricey, cheap]);
    // 1k in + 1k out projects to 0.02 for the cheap twin and 0.04 for the
    // pricey one; the budget sits in between
    let analysis = r#"{
        "expectedComplexity": 3,
        "requiredCapabilities": ["coding"],
        "estimatedInputTokens": 1000,
        "estimatedOutputTokens": 1000
    }"#;

    let request = RouteRequest {
        prompt: "write a migration script",
        attachments: &[],
        budget: Some(0.03),
        user: None,
    };
    let selected = select_model(&request, &Canned(analysis), &catalog, &RoutingConfig::default()).await;

    assert_eq!(selected, "openai/value");
}

#[tokio::test]
async fn analyzer_outage_degrades_to_default() {
    let catalog = StaticCatalog::from_config(&[model("openai", "gpt-4o")]);
    let config = RoutingConfig::default();

    let selected = select_model(&RouteRequest::new("anything"), &Outage, &catalog, &config).await;
    assert_eq!(selected, config.default_model);

    let selected = select_models(&RouteRequest::new("anything"), &Outage, &catalog, &config).await;
    assert_eq!(selected, vec![config.default_model]);
}

#[tokio::test]
async fn critical_strength_disqualifies_regardless_of_quality() {
    let mut blind = model("openai", "excellent-but-blind");
    blind.strengths = vec![Capability::Coding, Capability::Reasoning];
    blind.context_complexity = Some(5);
    blind.reliability = Some(5);
    blind.speed = Some(1);

    let mut sighted = model("google", "modest-vision");
    sighted.strengths = vec![Capability::Vision];
    sighted.reliability = Some(2);
    sighted.multimodal = true;

    let catalog = StaticCatalog::from_config(&[blind, sighted]);
    let analysis = r#"{
        "expectedComplexity": 3,
        "requiredCapabilities": ["vision"],
        "criticalCapabilities": ["vision"]
    }"#;

    let selected = select_model(
        &RouteRequest::new("what is in this chart?"),
        &Canned(analysis),
        &catalog,
        &RoutingConfig::default(),
    )
    .await;

    assert_eq!(selected, "google/modest-vision");
}

#[tokio::test]
async fn ambiguous_task_returns_a_diverse_comparison_set() {
    let mut first = model("openai", "generalist");
    first.strengths = vec![Capability::Reasoning, Capability::GeneralKnowledge];
    first.reliability = Some(5);

    // Same provider as the leader: must not appear alongside it
    let mut shadow = model("openai", "generalist-mini");
    shadow.strengths = vec![Capability::Reasoning, Capability::GeneralKnowledge];
    shadow.reliability = Some(5);

    let mut second = model("anthropic", "thinker");
    second.strengths = vec![Capability::Reasoning, Capability::GeneralKnowledge];
    second.reliability = Some(4);

    let catalog = StaticCatalog::from_config(&[first, shadow, second]);
    let analysis = r#"{"expectedComplexity": 4, "requiredCapabilities": ["reasoning", "general_knowledge"]}"#;

    let selected = select_models(
        &RouteRequest::new("compare these two economic policies"),
        &Canned(analysis),
        &catalog,
        &RoutingConfig::default(),
    )
    .await;

    assert_eq!(selected.len(), 2);
    assert_eq!(selected[0], "openai/generalist");
    assert_eq!(selected[1], "anthropic/thinker");
}

#[tokio::test]
async fn simple_task_returns_a_single_model() {
    let mut coder = model("openai", "coder");
    coder.strengths = vec![Capability::Coding];

    let catalog = StaticCatalog::from_config(&[coder]);
    // Coding-only requirements never trigger comparison mode
    let analysis = r#"{"expectedComplexity": 5, "requiredCapabilities": ["coding"]}"#;

    let selected = select_models(
        &RouteRequest::new("fix this segfault"),
        &Canned(analysis),
        &catalog,
        &RoutingConfig::default(),
    )
    .await;

    assert_eq!(selected, vec!["openai/coder".to_owned()]);
}

#[test]
fn fim_with_mismatched_preferred_provider_fails_loudly() {
    let mut fim = model("x", "infill");
    fim.fim = true;

    let catalog = StaticCatalog::from_config(&[fim]);

    assert_eq!(select_fim_model(&catalog, Some("x")).unwrap(), "x/infill");
    assert!(select_fim_model(&catalog, Some("y")).is_err());
}
