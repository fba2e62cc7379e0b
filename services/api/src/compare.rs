use clap::Args;
use procurement::config::AppConfig;
use procurement::error::AppError;
use procurement::workflows::proposals::{ComparisonReport, ComparisonRequest, ProposalScorer};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub(crate) struct CompareArgs {
    /// JSON file containing `requirement` terms and an `offers` array
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Print the report as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_compare(args: CompareArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let request = load_request(&args.input)?;
    let (requirement, offers) = request.into_parts();

    let report = ProposalScorer::new(config.scoring).compare(&requirement, &offers)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        render_report(&mut io::stdout().lock(), &report)?;
    }
    Ok(())
}

pub(crate) fn load_request(path: &Path) -> Result<ComparisonRequest, AppError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

pub(crate) fn render_report(out: &mut impl Write, report: &ComparisonReport) -> io::Result<()> {
    writeln!(out, "{}", report.summary)?;

    writeln!(out, "\nScores")?;
    for row in &report.scores {
        writeln!(
            out,
            "- {}: price {}, delivery {}, warranty {} => total {}",
            row.vendor_name, row.price_score, row.delivery_score, row.warranty_score, row.total_score
        )?;
    }

    writeln!(
        out,
        "\nRecommendation: {}\n  {}",
        report.recommendation.best_vendor, report.recommendation.reason
    )?;

    writeln!(out, "\nConsiderations")?;
    report
        .considerations
        .iter()
        .try_for_each(|note| writeln!(out, "- {note}"))
}
