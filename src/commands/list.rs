use console::style;
use eclipsify::GenerateOptions;
use miette::Result;

pub fn run(options: GenerateOptions) -> Result<()> {
    let invocation = eclipsify::prepare(options)?;
    eclipsify::print_banner(&invocation.context);

    println!("{}", style("Search path:").bold());
    for (i, dir) in invocation.search_path.dirs().iter().enumerate() {
        let marker = if dir.is_dir() {
            style("").dim()
        } else {
            style(" (missing)").dim()
        };
        println!("  {}. {}{}", i + 1, dir.display(), marker);
    }

    println!("\n{}", style("Templates:").bold());
    for resolution in eclipsify::resolve_templates(&invocation)? {
        match resolution.winner() {
            Some(dir) => println!(
                "  {} {} <- {}",
                style("\u{2713}").green(),
                resolution.target.display(),
                dir.join(&resolution.template).display()
            ),
            None => println!(
                "  {} {} <- {} {}",
                style("\u{2717}").red(),
                resolution.target.display(),
                resolution.template,
                style("(not found)").red()
            ),
        }
        for dir in resolution.candidates.iter().skip(1) {
            println!(
                "      {} {}",
                style("shadows").dim(),
                dir.join(&resolution.template).display()
            );
        }
    }

    Ok(())
}
