// Copyright (c) 2026 rezky_nightky

mod canvas;
mod cell;
mod config;
mod drips;
mod frame;
mod geometry;
mod host;
mod manager;
mod paint;
mod palette;
mod puddle;
mod region;
mod runtime;
mod terminal;

use std::env;
use std::path::Path;
use std::time::{Duration, Instant};

#[cfg(unix)]
use std::thread;

use clap::builder::styling::{AnsiColor as ClapAnsiColor, Color as ClapColor};
use clap::builder::styling::{Effects as ClapEffects, Style as ClapStyle};
use clap::builder::Styles as ClapStyles;
use clap::{CommandFactory, FromArgMatches};
use crossterm::event::{Event, KeyCode, KeyEventKind};

#[cfg(unix)]
use signal_hook::consts::{SIGHUP, SIGINT, SIGTERM};
#[cfg(unix)]
use signal_hook::iterator::Signals;

use crate::canvas::Canvas;
use crate::config::{color_enabled_stdout, default_params_usage_for_help, Args};
use crate::drips::Drips;
use crate::frame::Frame;
use crate::host::{TerminalShell, CELL_H, CELL_W};
use crate::manager::PuddleManager;
use crate::paint::Rgb;
use crate::palette::{build_palette, Palette};
use crate::runtime::{ColorMode, GlyphSet};
use crate::terminal::{restore_terminal_best_effort, Terminal};

const HELP_TEMPLATE_PLAIN: &str = "\
{before-help}{about-with-newline}
USAGE:
  {usage}

{all-args}{after-help}";

const HELP_TEMPLATE_COLOR: &str = "\
{before-help}{about-with-newline}
\x1b[1;36mUSAGE:\x1b[0m
  {usage}

{all-args}{after-help}";

const TINT_PRESETS: [Rgb; 4] = [
    Rgb::new(0xAA, 0xAA, 0xAA),
    Rgb::new(0x6F, 0xA8, 0xDC),
    Rgb::new(0x7F, 0xD1, 0xC7),
    Rgb::new(0xC9, 0xB6, 0xE4),
];

/// Longest step the simulation takes in one frame, in seconds.
const MAX_STEP_S: f32 = 0.25;

fn build_info() -> &'static str {
    env!("PUDDLEBAR_BUILD")
}

fn git_sha() -> &'static str {
    env!("PUDDLEBAR_GIT_SHA")
}

fn clap_styles() -> ClapStyles {
    ClapStyles::styled()
        .header(
            ClapStyle::new()
                .effects(ClapEffects::BOLD)
                .fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Cyan))),
        )
        .usage(
            ClapStyle::new()
                .effects(ClapEffects::BOLD)
                .fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Green))),
        )
        .literal(ClapStyle::new().fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Yellow))))
        .placeholder(ClapStyle::new().fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Magenta))))
}

fn require_f64_range(name: &str, v: f64, min: f64, max: f64) -> f64 {
    if !v.is_finite() {
        eprintln!("failed to apply {} {} (must be a finite number)", name, v);
        std::process::exit(1);
    }
    if v < min || v > max {
        eprintln!("failed to apply {} {} (min {} max {})", name, v, min, max);
        std::process::exit(1);
    }
    v
}

fn require_i8_range(name: &str, v: i8, min: i8, max: i8) -> i8 {
    if v < min || v > max {
        eprintln!("failed to apply {} {} (min {} max {})", name, v, min, max);
        std::process::exit(1);
    }
    v
}

fn require_u16_range(name: &str, v: u16, min: u16, max: u16) -> u16 {
    if v < min || v > max {
        eprintln!("failed to apply {} {} (min {} max {})", name, v, min, max);
        std::process::exit(1);
    }
    v
}

fn default_to_ascii() -> bool {
    let lang = env::var("LANG").unwrap_or_default();
    !lang.to_ascii_uppercase().contains("UTF")
}

fn detect_color_mode_auto() -> ColorMode {
    let colorterm = env::var("COLORTERM")
        .unwrap_or_default()
        .to_ascii_lowercase();
    if colorterm.contains("truecolor") || colorterm.contains("24bit") {
        return ColorMode::TrueColor;
    }

    let term = env::var("TERM").unwrap_or_default().to_ascii_lowercase();
    if term == "dumb" {
        return ColorMode::Mono;
    }
    if term.contains("256color") {
        return ColorMode::Color256;
    }

    ColorMode::Color16
}

fn detect_color_mode(args: &Args) -> ColorMode {
    if let Some(m) = args.colormode {
        return match m {
            0 => ColorMode::Mono,
            16 => ColorMode::Color16,
            8 | 256 => ColorMode::Color256,
            24 | 32 => ColorMode::TrueColor,
            _ => {
                eprintln!("invalid --colormode: {} (allowed: 0,16,8/256,24/32)", m);
                std::process::exit(1);
            }
        };
    }

    detect_color_mode_auto()
}

/// Sends log records to `log_file` when given. Without one, logging stays off
/// unless `RUST_LOG` asks for it, since stderr shares the alternate screen.
fn init_logging(log_file: Option<&Path>) -> std::io::Result<()> {
    let default_filter = if log_file.is_some() { "info" } else { "off" };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter));
    if let Some(path) = log_file {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    let _ = builder.try_init();
    Ok(())
}

fn draw_strip(frame: &mut Frame, shell: &TerminalShell, palette: &Palette, glyphs: GlyphSet) {
    let Some(top) = shell.strip_top_row(frame.height) else {
        return;
    };
    let bottom = top.saturating_add(shell.strip_rows()).min(frame.height);
    for y in top..bottom {
        frame.fill_row_bg(y, palette.strip_bg);
    }
    for x in 0..frame.width {
        frame.put_glyph(x as i32, top as i32, glyphs.strip(), palette.strip_edge);
    }
}

fn surface_units(w: u16, h: u16) -> (f32, f32) {
    ((w as i32 * CELL_W) as f32, (h as i32 * CELL_H) as f32)
}

fn main() -> std::io::Result<()> {
    std::panic::set_hook(Box::new(|info| {
        restore_terminal_best_effort();
        eprintln!("{}", info);
    }));

    #[cfg(unix)]
    {
        if let Ok(mut signals) = Signals::new([SIGINT, SIGTERM, SIGHUP]) {
            thread::spawn(move || {
                if let Some(sig) = signals.forever().next() {
                    restore_terminal_best_effort();
                    std::process::exit(128 + sig);
                }
            });
        }
    }

    #[cfg(windows)]
    {
        if let Err(e) = ctrlc::set_handler(|| {
            restore_terminal_best_effort();
            std::process::exit(130);
        }) {
            eprintln!("failed to install Ctrl-C handler: {}", e);
        }
    }

    let mut cmd = Args::command();
    cmd = cmd.styles(clap_styles());
    cmd = cmd.before_help(default_params_usage_for_help());
    let help_template = if color_enabled_stdout() {
        HELP_TEMPLATE_COLOR
    } else {
        HELP_TEMPLATE_PLAIN
    };
    cmd = cmd.help_template(help_template);
    cmd.build();

    if cmd.get_arguments().any(|a| a.get_id().as_str() == "help") {
        cmd = cmd.mut_arg("help", |a| a.help_heading("HELP"));
    }
    cmd.build();

    let matches = cmd.get_matches();
    let args = Args::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    if args.version {
        println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    if args.info {
        println!("Version: v{}", env!("CARGO_PKG_VERSION"));
        if git_sha().is_empty() {
            println!("Build: {}", build_info());
        } else {
            println!("Build: {} ({})", build_info(), git_sha());
        }
        println!("Copyright: (c) 2026 {}", env!("CARGO_PKG_AUTHORS"));
        println!("License: {}", env!("CARGO_PKG_LICENSE"));
        println!("Source: {}", env!("CARGO_PKG_REPOSITORY"));
        return Ok(());
    }

    let target_fps = require_f64_range("--fps", args.fps, 1.0, 240.0);
    let duration_s = args.duration.map(|s| {
        if !s.is_finite() {
            eprintln!("failed to apply --duration {} (must be a finite number)", s);
            std::process::exit(1);
        }
        if s > 0.0 {
            return require_f64_range("--duration", s, 0.1, 86400.0);
        }
        s
    });
    let max_drops = require_u16_range("--particles", args.particles, 1, 500);
    let wind = require_i8_range("--wind", args.wind, -20, 20);
    let strip_rows = require_u16_range("--taskbar-rows", args.taskbar_rows, 1, 8);

    if let Some(path) = &args.log_file {
        if let Err(e) = init_logging(Some(path)) {
            eprintln!("failed to apply --log-file {} ({})", path.display(), e);
            std::process::exit(1);
        }
    } else {
        init_logging(None)?;
    }

    let color_mode = detect_color_mode(&args);
    let glyphs = if args.ascii || default_to_ascii() {
        GlyphSet::Ascii
    } else {
        GlyphSet::Unicode
    };
    let mut tint = args.tint;
    let mut palette = build_palette(tint, color_mode);

    log::info!(
        "starting: fps={} particles={} wind={} taskbar={:?} rows={} color={:?} glyphs={:?}",
        target_fps,
        max_drops,
        wind,
        args.taskbar,
        strip_rows,
        color_mode,
        glyphs
    );

    let mut term = Terminal::new()?;
    let (w, h) = term.size()?;

    let shell = TerminalShell::new(args.taskbar, strip_rows);
    let mut manager = PuddleManager::new(Box::new(shell), tint, args.seed);
    if !manager.has_region() {
        log::info!("raining without a taskbar, no puddles will form");
    }

    let mut drips = Drips::new(max_drops as usize, wind as f32, args.seed.wrapping_add(1));
    let (sw, sh) = surface_units(w, h);
    drips.reset(sw, sh);

    let mut frame = Frame::new(w, h, palette.bg);
    let mut landed = Vec::new();

    let start_time = Instant::now();
    let end_time = duration_s.and_then(|s| {
        if s <= 0.0 {
            return None;
        }
        Some(start_time + Duration::from_secs_f64(s))
    });

    let target_period = Duration::from_secs_f64(1.0 / target_fps);
    let mut next_frame = Instant::now();
    let mut last_tick = Instant::now();
    let mut running = true;
    let mut paused = false;

    while running {
        if end_time.is_some_and(|end| Instant::now() >= end) {
            break;
        }
        let mut pending_resize: Option<(u16, u16)> = None;
        let mut reset_requested = false;

        loop {
            while Terminal::poll_event(Duration::from_millis(0))? {
                let ev = Terminal::read_event()?;
                match ev {
                    Event::Resize(nw, nh) => {
                        pending_resize = Some((nw, nh));
                    }
                    Event::Key(k) if k.kind == KeyEventKind::Press => {
                        if args.screensaver {
                            running = false;
                            break;
                        }

                        match k.code {
                            KeyCode::Esc | KeyCode::Char('q') => running = false,
                            KeyCode::Char(' ') => reset_requested = true,
                            KeyCode::Char('p') => {
                                paused = !paused;
                                log::debug!("paused: {}", paused);
                            }
                            KeyCode::Left => drips.wind = (drips.wind - 1.0).max(-20.0),
                            KeyCode::Right => drips.wind = (drips.wind + 1.0).min(20.0),
                            KeyCode::Up => drips.max_drops = (drips.max_drops + 5).min(500),
                            KeyCode::Down => {
                                drips.max_drops = drips.max_drops.saturating_sub(5).max(1)
                            }
                            KeyCode::Char(c @ '1'..='4') => {
                                let idx = c as usize - '1' as usize;
                                tint = TINT_PRESETS[idx];
                                palette = build_palette(tint, color_mode);
                                manager.set_tint(tint);
                            }
                            _ => {}
                        }
                    }
                    _ => {}
                }
            }

            if !running || pending_resize.is_some() {
                break;
            }

            let now = Instant::now();
            if now >= next_frame {
                break;
            }

            let mut timeout = next_frame - now;
            if let Some(end) = end_time {
                if now >= end {
                    break;
                }
                timeout = timeout.min(end - now);
            }
            let _ = Terminal::poll_event(timeout)?;
        }

        if !running {
            break;
        }

        if let Some((nw, nh)) = pending_resize {
            log::debug!("terminal resized to {}x{}", nw, nh);
            frame = Frame::new(nw, nh, palette.bg);
            reset_requested = true;
        }
        if reset_requested {
            manager.reset();
            if let Some(r) = manager.region() {
                log::debug!("taskbar now at {:?}", r.screen);
            }
            let (sw, sh) = surface_units(frame.width, frame.height);
            drips.reset(sw, sh);
        }

        let now = Instant::now();
        let dt = now
            .duration_since(last_tick)
            .as_secs_f32()
            .min(MAX_STEP_S);
        last_tick = now;

        if !paused {
            let floor = manager.region().map(|r| r.local.top as f32);
            drips.step(dt, floor, &mut landed);
            for pos in landed.drain(..) {
                manager.create_or_add_to_puddle(pos);
            }
            manager.update(dt);
        }

        frame.clear_with_bg(palette.bg);
        draw_strip(&mut frame, &shell, &palette, glyphs);
        drips.draw(&mut frame, glyphs, palette.drop);
        {
            let mut canvas = Canvas::new(&mut frame, color_mode, glyphs, palette.backdrop);
            manager.draw(&mut canvas);
            debug_assert_eq!(canvas.live_brushes(), 0);
        }
        term.draw(&frame)?;

        next_frame += target_period;
        let now = Instant::now();
        if now > next_frame {
            next_frame = now;
        }
    }

    drop(term);
    log::info!(
        "stopped after {:.1}s with {} puddles",
        start_time.elapsed().as_secs_f64(),
        manager.puddles().len()
    );

    Ok(())
}
