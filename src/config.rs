// Copyright (c) 2026 rezky_nightky

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::Parser;

use crate::paint::Rgb;

pub const DEFAULT_PARAMS_USAGE: &str = "DEFAULT PARAMS USAGE:\n  puddlebar --fps 60 --tint AAAAAA --particles 75 --wind 3 --taskbar bottom --taskbar-rows 2";

pub fn color_enabled_stdout() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if matches!(std::env::var("CLICOLOR").ok().as_deref(), Some("0")) {
        return false;
    }
    std::io::stdout().is_terminal()
}

fn colorize_usage(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 32);
    for line in text.split_inclusive('\n') {
        let body = line.trim_end_matches('\n');
        let nl = &line[body.len()..];
        if body.ends_with(':') && body == body.to_ascii_uppercase() {
            out.push_str("\x1b[1;36m");
            out.push_str(body);
            out.push_str("\x1b[0m");
        } else if let Some(rest) = body.strip_prefix("  puddlebar") {
            out.push_str("  \x1b[1;34mpuddlebar\x1b[0m");
            out.push_str(rest);
        } else {
            out.push_str(body);
        }
        out.push_str(nl);
    }
    out
}

pub fn default_params_usage_for_help() -> String {
    if color_enabled_stdout() {
        colorize_usage(DEFAULT_PARAMS_USAGE)
    } else {
        DEFAULT_PARAMS_USAGE.to_string()
    }
}

/// Where the simulated taskbar sits in the terminal.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskbarPlacement {
    #[value(name = "bottom")]
    Bottom,
    #[value(name = "top")]
    Top,
    #[value(name = "none")]
    None,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "puddlebar", version, disable_version_flag = true)]
pub struct Args {
    #[arg(
        short = 'f',
        long = "fps",
        default_value_t = 60.0,
        help_heading = "GENERAL",
        help = "Target FPS (min 1 max 240)"
    )]
    pub fps: f64,

    #[arg(
        long = "duration",
        help_heading = "GENERAL",
        help = "Stop after N seconds (min 0.1 max 86400; <=0 disables)"
    )]
    pub duration: Option<f64>,

    #[arg(
        short = 's',
        long = "screensaver",
        help_heading = "GENERAL",
        help = "Screensaver mode (exit on keypress)"
    )]
    pub screensaver: bool,

    #[arg(
        long = "seed",
        default_value_t = 0x5eed,
        help_heading = "GENERAL",
        help = "Random seed for rain and puddle placement"
    )]
    pub seed: u64,

    #[arg(
        short = 't',
        long = "tint",
        default_value = "AAAAAA",
        help_heading = "APPEARANCE",
        help = "Base water color as hex RRGGBB"
    )]
    pub tint: Rgb,

    #[arg(
        long = "colormode",
        help_heading = "APPEARANCE",
        help = "Force color mode (allowed: 0,16,8/256,24/32). Default: detected from COLORTERM/TERM"
    )]
    pub colormode: Option<u16>,

    #[arg(
        long = "ascii",
        help_heading = "APPEARANCE",
        help = "Draw with ASCII glyphs only (default when LANG is not UTF-8)"
    )]
    pub ascii: bool,

    #[arg(
        short = 'p',
        long = "particles",
        default_value_t = 75,
        help_heading = "RAIN",
        help = "Maximum drops in the air (min 1 max 500)"
    )]
    pub particles: u16,

    #[arg(
        short = 'w',
        long = "wind",
        default_value_t = 3,
        allow_negative_numbers = true,
        help_heading = "RAIN",
        help = "Wind speed, negative blows left (min -20 max 20)"
    )]
    pub wind: i8,

    #[arg(
        long = "taskbar",
        default_value_t = TaskbarPlacement::Bottom,
        value_enum,
        help_heading = "TASKBAR",
        help = "Taskbar placement (bottom, top, none); puddles only form on a bottom taskbar"
    )]
    pub taskbar: TaskbarPlacement,

    #[arg(
        long = "taskbar-rows",
        default_value_t = 2,
        help_heading = "TASKBAR",
        help = "Taskbar height in rows (min 1 max 8)"
    )]
    pub taskbar_rows: u16,

    #[arg(
        long = "log-file",
        help_heading = "DIAGNOSTICS",
        help = "Write log records to FILE (filter with RUST_LOG, default info)"
    )]
    pub log_file: Option<PathBuf>,

    #[arg(
        long = "info",
        short = 'i',
        help_heading = "HELP",
        help = "Print version info and exit"
    )]
    pub info: bool,

    #[arg(
        long = "version",
        short = 'v',
        help_heading = "HELP",
        help = "Print version and exit"
    )]
    pub version: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_usage_line() {
        let args = Args::try_parse_from(["puddlebar"]).unwrap();
        assert_eq!(args.fps, 60.0);
        assert_eq!(args.tint, Rgb::new(0xAA, 0xAA, 0xAA));
        assert_eq!(args.particles, 75);
        assert_eq!(args.wind, 3);
        assert_eq!(args.taskbar, TaskbarPlacement::Bottom);
        assert_eq!(args.taskbar_rows, 2);
        assert!(args.log_file.is_none());
    }

    #[test]
    fn parses_negative_wind_and_placement() {
        let args =
            Args::try_parse_from(["puddlebar", "-w", "-7", "--taskbar", "none", "-t", "#336699"])
                .unwrap();
        assert_eq!(args.wind, -7);
        assert_eq!(args.taskbar, TaskbarPlacement::None);
        assert_eq!(args.tint, Rgb::new(0x33, 0x66, 0x99));
    }

    #[test]
    fn rejects_bad_tint() {
        assert!(Args::try_parse_from(["puddlebar", "--tint", "blue"]).is_err());
    }

    #[test]
    fn colorize_marks_headings() {
        let out = colorize_usage("USAGE:\n  puddlebar -f 30\nplain");
        assert!(out.starts_with("\x1b[1;36mUSAGE:\x1b[0m\n"));
        assert!(out.contains("\x1b[1;34mpuddlebar\x1b[0m -f 30\n"));
        assert!(out.ends_with("plain"));
    }
}
