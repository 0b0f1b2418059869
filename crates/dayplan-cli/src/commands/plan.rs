use clap::{Args, ValueEnum};
use dayplan_core::{handle_plan_request, Config, Locale, PlanBlock, PlanRequest, PlanSummary, ResponseBody};

use super::read_input;

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
}

#[derive(Args)]
pub struct PlanArgs {
    /// Request file, or "-" for stdin
    #[arg(short, long, default_value = "-")]
    input: String,
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,
    /// Message language (overrides config)
    #[arg(long)]
    locale: Option<Locale>,
}

pub fn run(args: PlanArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let locale = args.locale.unwrap_or(config.locale);
    let body = read_input(&args.input)?;

    let response = handle_plan_request(&body, &config.defaults, locale);
    match (&response.body, args.format) {
        (ResponseBody::Plan { plan }, OutputFormat::Text) => {
            let tasks = PlanRequest::from_json(&body)?.tasks.unwrap_or_default();
            print_timetable(plan);
            print_summary(&PlanSummary::from_plan(&tasks, plan));
        }
        (ResponseBody::Plan { .. }, OutputFormat::Json) => {
            println!("{}", response.to_json()?);
        }
        (ResponseBody::Error { error }, format) => {
            if let OutputFormat::Json = format {
                println!("{}", response.to_json()?);
            }
            return Err(error.clone().into());
        }
    }
    Ok(())
}

fn print_timetable(plan: &[PlanBlock]) {
    if plan.is_empty() {
        println!("(empty plan)");
        return;
    }
    for block in plan {
        println!(
            "{}-{}  {:<5}  {}",
            block.start.format("%H:%M"),
            block.end.format("%H:%M"),
            block.block_type.to_string(),
            block.title
        );
    }
}

fn print_summary(summary: &PlanSummary) {
    println!();
    println!(
        "work {} min, breaks {} min, fixed {} min ({} min requested)",
        summary.work_minutes, summary.break_minutes, summary.fixed_minutes, summary.requested_minutes
    );
    if !summary.is_complete() {
        println!("unscheduled: {}", summary.unscheduled_task_ids.join(", "));
    }
}
