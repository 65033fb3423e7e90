//! Read-only inspection commands.
//!
//! Each handler loads what it needs (catalog, feed, or both) with the same
//! soft-fail loaders the server uses, so the output reflects what the map
//! page would show.

use anyhow::Context;
use parkmap_core::{AppConfig, FacilityCatalog, FacilityKind, FacilityRef, Feedback, StallCounts};
use parkmap_feedback::{FeedbackClient, FeedbackIndex};
use parkmap_selection::{feedback_form_url, with_selection};
use url::Url;

async fn load_catalog(config: &AppConfig) -> FacilityCatalog {
    parkmap_facilities::load_catalog(&config.park_csv_path, &config.toilet_csv_path).await
}

async fn load_feedback(config: &AppConfig) -> anyhow::Result<FeedbackIndex> {
    let client = FeedbackClient::from_config(config).context("building feedback client")?;
    let feedback = match client.fetch_feedback(config.feedback_schema).await {
        Ok(feedback) => feedback,
        Err(e) => {
            tracing::error!(error = %e, "feedback feed unavailable; showing none");
            Vec::new()
        }
    };
    Ok(FeedbackIndex::new(feedback))
}

pub(crate) fn format_facility_line(facility: &FacilityRef) -> String {
    let position = facility.position();
    format!(
        "{}\t{}\t{}\t{}\t{:.6},{:.6}",
        facility.kind(),
        facility.id(),
        facility.name(),
        facility.address(),
        position.lat,
        position.lng
    )
}

fn fmt_count(count: Option<u32>) -> String {
    count.map_or_else(|| "-".to_owned(), |n| n.to_string())
}

fn fmt_stalls(stalls: &StallCounts) -> String {
    format!(
        "total {} / urinal {} / squat {} / western {}",
        fmt_count(stalls.total),
        fmt_count(stalls.urinal),
        fmt_count(stalls.squat),
        fmt_count(stalls.western)
    )
}

pub(crate) fn format_facility_detail(facility: &FacilityRef) -> String {
    let position = facility.position();
    let mut lines = vec![
        format!("{}（{}）", facility.name(), facility.kind().label()),
        format!("id:      {}", facility.id()),
        format!("住所:    {}", facility.address()),
        format!("位置:    {:.6},{:.6}", position.lat, position.lng),
    ];

    if let FacilityRef::Toilet(toilet) = facility {
        let fixtures = &toilet.fixtures;
        let access = &toilet.accessibility;
        lines.extend([
            format!("男性:    {}", fmt_stalls(&fixtures.men)),
            format!("女性:    {}", fmt_stalls(&fixtures.women)),
            format!("共用:    {}", fmt_stalls(&fixtures.unisex)),
            format!("多機能:  {}", fmt_count(fixtures.multifunction)),
            format!("車椅子:  {}", access.wheelchair.label()),
            format!("ベビー:  {}", access.baby_room.label()),
            format!("オストメイト: {}", access.ostomy.label()),
        ]);
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

pub(crate) fn format_feedback(feedback: &Feedback) -> String {
    let mut lines = vec![format!(
        "[{}] {} {} #{}",
        feedback.timestamp, feedback.feedback_type, feedback.facility_type, feedback.facility_id
    )];
    if !feedback.details.is_empty() {
        lines.push(format!("  {}", feedback.details));
    }
    lines.extend(feedback.image_urls.iter().map(|url| format!("  image: {url}")));
    lines.join("\n")
}

pub(crate) async fn run_facilities(
    config: &AppConfig,
    kind: Option<FacilityKind>,
) -> anyhow::Result<()> {
    let catalog = load_catalog(config).await;
    for facility in catalog.iter().filter(|f| kind.is_none_or(|k| f.kind() == k)) {
        println!("{}", format_facility_line(&facility));
    }
    Ok(())
}

pub(crate) async fn run_show(config: &AppConfig, kind: FacilityKind, id: &str) -> anyhow::Result<()> {
    let (catalog, index) = tokio::join!(load_catalog(config), load_feedback(config));
    let index = index?;
    let facility = catalog
        .find(kind, id)
        .with_context(|| format!("{kind} '{id}' is not in the loaded data"))?;

    print!("{}", format_facility_detail(&facility));
    let feedback = index.feedback_for(id);
    println!("\nフィードバック: {}件", feedback.len());
    for fb in feedback {
        println!("{}", format_feedback(fb));
    }
    Ok(())
}

pub(crate) async fn run_feedback(
    config: &AppConfig,
    facility_id: Option<&str>,
    orphans: bool,
) -> anyhow::Result<()> {
    let index = load_feedback(config).await?;
    let mut selected = match facility_id {
        Some(id) => index.feedback_for(id),
        None => index.all_newest_first(),
    };
    if orphans {
        let catalog = load_catalog(config).await;
        index.report_orphans(&catalog);
        selected.retain(|f| !catalog.contains_id(&f.facility_id));
    }
    for fb in selected {
        println!("{}", format_feedback(fb));
    }
    Ok(())
}

pub(crate) async fn run_link(
    config: &AppConfig,
    kind: FacilityKind,
    id: &str,
    page_url: &str,
) -> anyhow::Result<()> {
    let page = Url::parse(page_url).with_context(|| format!("invalid page url '{page_url}'"))?;
    let catalog = load_catalog(config).await;
    if catalog.find(kind, id).is_none() {
        tracing::warn!(kind = %kind, id, "facility is not in the loaded data; link will not resolve");
    }

    let deep_link = with_selection(&page, kind, id);
    let form = feedback_form_url(&config.feedback_form_url, kind, id)
        .context("PARKMAP_FEEDBACK_FORM_URL is not an absolute URL")?;
    println!("{deep_link}");
    println!("{form}");
    Ok(())
}
