use picofetch::art;
use picofetch::config::{self, Overrides, Settings};
use picofetch::data::{OsRelease, Uname};
use picofetch::providers::{Context, Registry, DEFAULT_SELECTION};
use picofetch::render::{bottom_gap, Session};
use picofetch::term::{isatty, Emitter, Palette, Seq, WrapGuard};
use std::env;
use std::io::{self, BufWriter, Write};

fn main() {
    let mut settings = Settings::from_env();
    let overrides = config::load_overrides(&settings);
    if let Some(threshold) = overrides.as_ref().and_then(|o| o.pkg_threshold) {
        settings.pkg_threshold = threshold;
    }

    let emitter = Emitter::for_terminal(
        &settings.term,
        settings.color_pref,
        isatty(libc::STDOUT_FILENO),
    );
    let palette = Palette::resolve(&emitter, &settings.palette_overrides);

    // line wrap stays off for the whole run and comes back on drop,
    // however the run ends
    let _wrap = WrapGuard::engage(&emitter);

    // rendering errors (broken pipe and the like) never become a
    // user-visible failure
    let _ = run(&settings, overrides, &emitter, &palette);
}

fn run(
    settings: &Settings,
    overrides: Option<Overrides>,
    emitter: &Emitter,
    palette: &Palette,
) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    let os_release = OsRelease::load("/etc/os-release").ok();
    let uname = Uname::query();

    let explicit = env::args().nth(1);
    let art = art::load(
        explicit.as_deref(),
        settings.ascii.as_deref(),
        os_release.as_ref(),
        palette,
    );

    for line in &art.lines {
        writeln!(out, "{}{}{}", palette.bold(), line, palette.reset())?;
    }
    // back to the top of the art block so the info column shares its rows
    emitter.print(&mut out, Seq::Up(art.height))?;

    let mut registry = Registry::with_builtins();
    if let Some(overrides) = &overrides {
        registry.apply_overrides(&overrides.providers);
    }

    let default: Vec<String> = DEFAULT_SELECTION.iter().map(|s| s.to_string()).collect();
    let selection = settings.selection.as_ref().unwrap_or(&default);
    let selected = registry.select(selection.iter().map(String::as_str));

    // the label column must be final before the first line renders
    let label_width = Session::label_column_width(selected.iter().flat_map(|p| p.labels()));
    let ascii_width = settings.align.unwrap_or(art.width + 4);

    let ctx = Context {
        os_release,
        uname,
        emitter,
        palette,
        settings,
    };
    let mut session = Session::new(emitter, palette, &settings.separator, ascii_width, label_width);
    for provider in &selected {
        for item in provider.produce(&ctx) {
            session.render(&mut out, &item)?;
        }
    }

    // drop the cursor below the taller of the two blocks
    for _ in 0..bottom_gap(art.height, session.info_height()) {
        writeln!(out)?;
    }
    out.flush()
}
