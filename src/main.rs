// mic-icon: draw the app icon and write it at full and 256px size.
// • default: writes ./icon.png (512x512) and ./icon_256.png
// • --preview: shows the icon in a window instead (ESC closes)
// • --dump-style: prints the active style as TOML, a starting point for --style

use anyhow::{Context, Result};
use mic_icon::cli::{Options, USAGE};
use mic_icon::logging::{LoggingConfig, init_logging};
use mic_icon::{preview, render, write_icon_set};

fn main() -> Result<()> {
    let opts = Options::parse(std::env::args().skip(1))?;
    init_logging(if opts.verbose { LoggingConfig::verbose() } else { LoggingConfig::default() });

    if opts.help {
        println!("{USAGE}");
        return Ok(());
    }

    let style = opts.style().context("loading icon style")?;
    match &opts.style_path {
        Some(path) => log::debug!("style from {}", path.display()),
        None => log::debug!("preset {}", opts.preset),
    }

    if opts.dump_style {
        print!("{}", style.to_toml()?);
        return Ok(());
    }

    if opts.preview {
        let img = render(opts.size, &style).context("rendering preview")?;
        preview::show(&img, "mic-icon preview")?;
        return Ok(());
    }

    let set = write_icon_set(&opts.out_dir, opts.size, &style)
        .with_context(|| format!("writing icons to {}", opts.out_dir.display()))?;
    log::debug!("wrote {} and {}", set.full.display(), set.secondary.display());
    Ok(())
}
