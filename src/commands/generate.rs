use console::style;
use eclipsify::GenerateOptions;
use miette::Result;

pub fn run(options: GenerateOptions) -> Result<()> {
    let invocation = eclipsify::prepare(options)?;
    eclipsify::print_banner(&invocation.context);

    let report = eclipsify::generate(&invocation)?;

    if invocation.dry_run {
        println!(
            "\n{} Dry run, files that would be generated in {}:",
            style("==>").cyan().bold(),
            style(report.output_dir.display()).cyan()
        );
        for path in &report.written {
            println!("  {} {}", style("create").green(), path.display());
        }
        println!("\n{} Dry run, no files written.", style("\u{2139}").blue().bold());
        return Ok(());
    }

    println!(
        "\n{} Project generated at {}",
        style("\u{2713}").green().bold(),
        style(report.output_dir.display()).cyan()
    );
    print!("  {} files written", report.written.len());
    if report.skipped.is_empty() {
        println!();
    } else {
        println!(
            ", {} skipped ({})",
            report.skipped.len(),
            report.skipped.join(", ")
        );
    }

    Ok(())
}
