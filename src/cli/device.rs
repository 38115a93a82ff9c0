use std::{error::Error, time::Duration};

use tabled::settings::{Panel, Style};
use tabled::{Table, Tabled};

use crate::input::{
    component::{Component, ComponentKind},
    controller::Controller,
};

#[derive(Tabled)]
struct ControllerRow {
    #[tabled(rename = "Index")]
    index: usize,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    controller_type: String,
    #[tabled(rename = "Port")]
    port_type: String,
    #[tabled(rename = "Components")]
    components: usize,
    #[tabled(rename = "Rumblers")]
    rumblers: usize,
    #[tabled(rename = "Fused")]
    fused: bool,
}

#[derive(Tabled)]
struct ComponentRow {
    #[tabled(rename = "Index")]
    index: usize,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Analog")]
    analog: bool,
    #[tabled(rename = "Relative")]
    relative: bool,
    #[tabled(rename = "Dead Zone")]
    dead_zone: String,
}

impl ComponentRow {
    fn new(index: usize, component: &Component) -> Self {
        let kind = match component.kind() {
            ComponentKind::Axis(_) => "Axis",
            ComponentKind::Pov { .. } => "POV",
            ComponentKind::Button => "Button",
        };
        Self {
            index,
            name: component.name(),
            kind: kind.to_string(),
            analog: component.is_analog(),
            relative: component.is_relative(),
            dead_zone: format!("{:.4}", component.dead_zone()),
        }
    }
}

fn get_controller(controllers: &[Controller], index: usize) -> Result<&Controller, Box<dyn Error>> {
    controllers
        .get(index)
        .ok_or_else(|| format!("Controller does not exist with index: {index}").into())
}

pub fn handle_list(controllers: &[Controller]) -> Result<(), Box<dyn Error>> {
    let rows: Vec<ControllerRow> = controllers
        .iter()
        .enumerate()
        .map(|(index, controller)| ControllerRow {
            index,
            name: controller.name().to_string(),
            controller_type: controller.controller_type().to_string(),
            port_type: controller.port_type().to_string(),
            components: controller.components().len(),
            rumblers: controller.rumblers().len(),
            fused: controller.is_fused(),
        })
        .collect();
    let count = rows.len();

    let mut table = Table::new(rows);
    table
        .with(Style::modern_rounded())
        .with(Panel::header("Controllers"));
    println!("{table}");
    println!("Found {count} controller(s)");

    Ok(())
}

pub fn handle_info(controllers: &[Controller], index: usize) -> Result<(), Box<dyn Error>> {
    let controller = get_controller(controllers, index)?;
    let rows: Vec<ComponentRow> = controller
        .components()
        .iter()
        .enumerate()
        .map(|(index, component)| ComponentRow::new(index, component))
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::modern_rounded()).with(Panel::header(format!(
        "{} ({}, {})",
        controller.name(),
        controller.controller_type(),
        controller.port_type()
    )));
    println!("{table}");

    for rumbler in controller.rumblers() {
        println!("Rumbler: {}", rumbler.name());
    }

    Ok(())
}

pub async fn handle_watch(
    controllers: &mut [Controller],
    index: usize,
    interval_ms: u64,
) -> Result<(), Box<dyn Error>> {
    if index >= controllers.len() {
        return Err(format!("Controller does not exist with index: {index}").into());
    }
    let controller = &mut controllers[index];
    println!("Watching '{}', press CTRL+C to stop", controller.name());

    let mut interval = tokio::time::interval(Duration::from_millis(interval_ms.max(1)));
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            _ = interval.tick() => (),
        }

        controller.poll()?;
        while let Some(event) = controller.next_event() {
            println!(
                "{:>16} {:<16} {:>8.4}",
                event.nanos(),
                event.identifier().to_string(),
                event.value()
            );
        }
    }

    Ok(())
}

pub async fn handle_rumble(
    controllers: &[Controller],
    index: usize,
    intensity: f32,
    duration_ms: u64,
) -> Result<(), Box<dyn Error>> {
    let controller = get_controller(controllers, index)?;
    if controller.rumblers().is_empty() {
        return Err(format!("Controller '{}' has no rumblers", controller.name()).into());
    }

    for rumbler in controller.rumblers() {
        println!("Playing {} at {intensity}", rumbler.name());
        rumbler.rumble(intensity);
    }
    tokio::time::sleep(Duration::from_millis(duration_ms)).await;
    for rumbler in controller.rumblers() {
        rumbler.rumble(0.0);
    }

    Ok(())
}
