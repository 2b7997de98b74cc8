//! `dpt spec` command - Project specification loading and validation

use clap::Subcommand;
use console::style;
use miette::Result;
use std::path::PathBuf;

use crate::cli::commands::{load_spec, resolve_project};
use crate::cli::GlobalOpts;
use crate::engine::Subsystem;

#[derive(Subcommand, Debug)]
pub enum SpecCommands {
    /// Summarize the project specification
    Show(SpecArgs),

    /// Validate the specification; fails on contract violations
    Check(SpecArgs),
}

#[derive(clap::Args, Debug)]
pub struct SpecArgs {
    /// Specification file (default: <project>/spec.yaml)
    #[arg(long, short = 's')]
    pub spec: Option<PathBuf>,
}

pub fn run(cmd: SpecCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        SpecCommands::Show(args) => show(args, global),
        SpecCommands::Check(args) => check(args, global),
    }
}

fn show(args: SpecArgs, global: &GlobalOpts) -> Result<()> {
    let project = resolve_project(global)?;
    let spec = load_spec(&project, args.spec.as_ref())?;

    println!("{}", style(&spec.project_info.name).bold());
    println!(
        "  {} V low / {} V medium, {} Hz",
        spec.project_info.l_voltage, spec.project_info.m_voltage, spec.project_info.frequency
    );
    if !spec.project_info.plc_series.is_empty() {
        println!("  PLC family: {}", spec.project_info.plc_series);
    }
    if !spec.project_info.proj_avl.is_empty() {
        println!("  Approved brands: {}", spec.project_info.proj_avl.join(", "));
    }
    println!();

    let sections: [(Subsystem, bool, usize, usize); 7] = [
        section_summary(Subsystem::Bagfilter, &spec),
        section_summary(Subsystem::FanDamper, &spec),
        section_summary(Subsystem::Transport, &spec),
        section_summary(Subsystem::FreshAir, &spec),
        section_summary(Subsystem::HopperHeater, &spec),
        section_summary(Subsystem::Vibration, &spec),
        section_summary(Subsystem::Installation, &spec),
    ];
    for (subsystem, enabled, motors, instruments) in sections {
        let status = if enabled {
            style("enabled").green()
        } else {
            style("disabled").dim()
        };
        println!(
            "  {:<14} {}  {} motor(s), {} instrument(s)",
            subsystem.label(),
            status,
            motors,
            instruments
        );
    }
    Ok(())
}

fn section_summary(
    subsystem: Subsystem,
    spec: &crate::spec::ProjectSpec,
) -> (Subsystem, bool, usize, usize) {
    match subsystem {
        Subsystem::Bagfilter => match &spec.bagfilter {
            Some(s) => (subsystem, s.status, s.motors.len(), s.instruments.len()),
            None => (subsystem, false, 0, 0),
        },
        Subsystem::FanDamper => motor_section(subsystem, spec.fan_damper.as_ref()),
        Subsystem::Transport => motor_section(subsystem, spec.transport.as_ref()),
        Subsystem::FreshAir => motor_section(subsystem, spec.fresh_air.as_ref()),
        Subsystem::Vibration => motor_section(subsystem, spec.vibration.as_ref()),
        Subsystem::HopperHeater => match &spec.hopper_heater {
            Some(s) => (subsystem, s.status, s.heaters.len(), s.instruments.len()),
            None => (subsystem, false, 0, 0),
        },
        Subsystem::Installation => match &spec.installation {
            Some(s) => (subsystem, s.status, 0, 0),
            None => (subsystem, false, 0, 0),
        },
    }
}

fn motor_section(
    subsystem: Subsystem,
    section: Option<&crate::spec::MotorSection>,
) -> (Subsystem, bool, usize, usize) {
    match section {
        Some(s) => (subsystem, s.status, s.motors.len(), s.instruments.len()),
        None => (subsystem, false, 0, 0),
    }
}

fn check(args: SpecArgs, global: &GlobalOpts) -> Result<()> {
    let project = resolve_project(global)?;
    let spec = load_spec(&project, args.spec.as_ref())?;

    let issues = spec.validate();
    if issues.is_empty() {
        println!("{} specification is buildable", style("✓").green());
        Ok(())
    } else {
        for issue in &issues {
            println!("{} {}", style("✗").red(), issue);
        }
        Err(miette::miette!(
            "{} issue(s) found in the specification",
            issues.len()
        ))
    }
}
