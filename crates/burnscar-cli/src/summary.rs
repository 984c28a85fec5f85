use burnscar_core::pipeline::{
    AnnualReport, PipelineConfig, PipelineReport, StackPlan, ThresholdReport,
};
use console::Style;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    method: Style,
    disabled: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

fn print_title(s: &Styles, title: &str) {
    println!();
    println!("  {}", s.title.apply_to(title));
    println!(
        "  {}",
        s.title.apply_to("\u{2550}".repeat(title.chars().count()))
    );
    println!();
}

/// Header shown before a single-stage command starts.
pub fn print_run_header(title: &str, config: &PipelineConfig, plan: &StackPlan) {
    let s = Styles::new();
    print_title(&s, title);
    println!(
        "  {:<14}{}",
        s.label.apply_to("Stack"),
        s.path.apply_to(config.stack_file.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Years"),
        s.value.apply_to(plan.years)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Scenes"),
        s.value.apply_to(plan.scenes().len())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Workers"),
        s.value.apply_to(config.workers)
    );
    println!();
}

/// Full configuration of a `run` invocation.
pub fn print_pipeline_config(config: &PipelineConfig) {
    let s = Styles::new();
    print_title(&s, "Burned Area Pipeline");

    println!(
        "  {:<14}{}",
        s.label.apply_to("Stack"),
        s.path.apply_to(config.stack_file.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Probability"),
        s.path.apply_to(config.bp_dir.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Classes"),
        s.path.apply_to(config.bc_dir.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Output"),
        s.path.apply_to(config.output_dir.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Workers"),
        s.value.apply_to(config.workers)
    );
    println!();

    println!("  {}", s.header.apply_to("Threshold"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Seed"),
        s.value.apply_to(format!(
            ">= {}% ({} px)",
            config.threshold.seed_prob_thresh, config.threshold.seed_size_thresh
        ))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Fill"),
        s.value.apply_to(format!("> {}%", config.threshold.flood_fill_prob_thresh))
    );
    println!();

    println!("  {}", s.header.apply_to("Annual"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Block"),
        s.value.apply_to(format!("{} px", config.annual.block_size))
    );
    match &config.annual.extent_file {
        Some(path) => println!(
            "    {:<12}{}",
            s.label.apply_to("Extent"),
            s.path.apply_to(path.display())
        ),
        None => println!(
            "    {:<12}{}",
            s.label.apply_to("Extent"),
            s.disabled.apply_to("scene grid")
        ),
    }
    println!(
        "    {:<12}{}",
        s.label.apply_to("Quicklooks"),
        if config.annual.quicklooks {
            s.method.apply_to("png")
        } else {
            s.disabled.apply_to("disabled")
        }
    );
    println!();

    match &config.composite {
        Some(composite) => {
            println!("  {}", s.header.apply_to("Composite"));
            println!(
                "    {:<12}{}",
                s.label.apply_to("Indices"),
                s.method.apply_to(composite.indices.join(", "))
            );
            println!(
                "    {:<12}{}",
                s.label.apply_to("Output"),
                s.path.apply_to(composite.output_dir.display())
            );
        }
        None => println!(
            "  {:<14}{}",
            s.header.apply_to("Composite"),
            s.disabled.apply_to("disabled")
        ),
    }
    println!();
}

pub fn print_threshold_summary(report: &ThresholdReport) {
    let s = Styles::new();
    let burned: usize = report.scenes.iter().map(|r| r.burned_pixels).sum();
    println!();
    println!("  {}", s.header.apply_to("Thresholding"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Scenes"),
        s.value.apply_to(report.scenes.len())
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Regions"),
        s.value.apply_to(report.total_regions())
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Burned px"),
        s.value.apply_to(burned)
    );
    println!();
}

pub fn print_annual_summary(title: &str, report: &AnnualReport) {
    let s = Styles::new();
    println!();
    println!("  {}", s.header.apply_to(title));
    for year in &report.years {
        let scenes = if year.scenes == 0 {
            s.disabled.apply_to("no scenes".to_string())
        } else {
            s.value.apply_to(format!("{} scenes", year.scenes))
        };
        println!(
            "    {:<12}{}, {} outputs",
            s.label.apply_to(year.year),
            scenes,
            year.outputs.len()
        );
    }
    println!(
        "    {:<12}{}",
        s.label.apply_to("Total"),
        s.value.apply_to(report.output_count())
    );
    println!();
}

pub fn print_pipeline_report(report: &PipelineReport) {
    let s = Styles::new();
    print_threshold_summary(&report.threshold);
    print_annual_summary("Annual Products", &report.annual);
    if let Some(composite) = &report.composite {
        print_annual_summary("Seasonal Products", composite);
    }
    println!(
        "  {:<14}{}",
        s.label.apply_to("Years"),
        s.value.apply_to(report.years)
    );
    if report.sidecars_removed > 0 {
        println!(
            "  {:<14}{}",
            s.label.apply_to("Cleaned"),
            s.value.apply_to(format!("{} sidecars", report.sidecars_removed))
        );
    }
    println!();
}
