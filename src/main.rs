//! Headless demo binary for the cameraman camera engine.

use std::path::PathBuf;

use cameraman::animation::{
    ConflictPolicy, LookAtRequest, PathType, TransitionHandle,
    TransitionOutcome,
};
use cameraman::options::Options;
use cameraman::render::FrameScheduler;
use cameraman::scene::{Aabb, NodeId, SceneGraph, Transform};
use cameraman::view::ViewAngle;
use cameraman::{Cameraman, CameramanError};
use clap::Parser;
use glam::{Quat, Vec3};
use web_time::{Duration, Instant};

/// Fly a headless camera around a small showroom scene and log every frame.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML options preset
    #[arg(long)]
    options: Option<PathBuf>,
    /// Node to frame: car, logo, body, or wheel_fl/fr/rl/rr
    #[arg(long, default_value = "car")]
    target: String,
    /// Camera placement angle (name or index)
    #[arg(long)]
    view_from: Option<String>,
    /// Aim angle (name or index)
    #[arg(long)]
    look_at: Option<String>,
    /// Flight duration in milliseconds
    #[arg(long)]
    duration_ms: Option<u64>,
    /// Flight path: linear or curved
    #[arg(long)]
    path: Option<String>,
    /// Simulated frame rate
    #[arg(long, default_value_t = 60)]
    fps: u32,
    /// Queue a flight through every view angle of the target
    #[arg(long)]
    tour: bool,
}

fn main() -> Result<(), CameramanError> {
    env_logger::init();
    let args = Args::parse();

    let options = match &args.options {
        Some(path) => {
            log::info!("Loading options from {}", path.display());
            Options::load(path)?
        }
        None => Options::default(),
    };

    let (mut graph, scene) = showroom(&options)?;
    let target = graph.node_by_name(scene, &args.target)?;

    let mut scheduler = FrameScheduler::new(args.fps);
    let mut cameraman = Cameraman::from_options(
        &options,
        16.0 / 9.0,
        scheduler.redraw_callback(),
    );
    if args.tour {
        cameraman.set_conflict_policy(ConflictPolicy::Queue);
    }

    let request = build_request(&args, &options, target);
    let mut now = Instant::now();
    let mut handles = vec![cameraman.look_at(&mut graph, request, now)?];
    if args.tour {
        for angle in ViewAngle::ALL.into_iter().skip(1) {
            handles.push(cameraman.look_at(
                &mut graph,
                request.view_from(angle),
                now,
            )?);
        }
    }

    let frame = Duration::from_secs_f64(1.0 / f64::from(args.fps.max(1)));
    let mut pending = handles.len();
    while pending > 0 {
        let _ = cameraman.tick(&mut graph, now);
        if scheduler.should_render(now) && scheduler.take_redraw() {
            let camera = cameraman.camera();
            log::info!(
                "frame {:>4}: eye {:.3} target {:.3}",
                scheduler.frames(),
                camera.eye,
                camera.target
            );
            scheduler.end_frame(now);
        }
        pending -= drain_outcomes(&mut handles);
        now += frame;
    }

    log::info!(
        "Done after {} rendered frames ({:.1} fps)",
        scheduler.frames(),
        scheduler.fps()
    );
    Ok(())
}

fn build_request(
    args: &Args,
    options: &Options,
    target: NodeId,
) -> LookAtRequest {
    let mut request =
        LookAtRequest::from_options(target, &options.transition);
    if let Some(angle) = &args.view_from {
        request = request.view_from(ViewAngle::parse_or_center(angle));
    }
    if let Some(angle) = &args.look_at {
        request = request.looking_at(ViewAngle::parse_or_center(angle));
    }
    if let Some(ms) = args.duration_ms {
        request = request.over(Duration::from_millis(ms));
    }
    match args.path.as_deref() {
        Some("curved") => request = request.along(PathType::Curved),
        Some("linear") => request = request.along(PathType::Linear),
        Some(other) => {
            log::warn!("Unknown path \"{other}\", keeping default");
        }
        None => {}
    }
    request
}

/// Log newly resolved handles; returns how many resolved.
fn drain_outcomes(handles: &mut [TransitionHandle]) -> usize {
    let mut resolved = 0;
    for handle in handles {
        let Some(outcome) = handle.try_outcome() else {
            continue;
        };
        resolved += 1;
        match outcome {
            TransitionOutcome::Completed(report) => log::info!(
                "Transition {} completed in {} steps, camera at {:.3}",
                handle.id(),
                report.steps,
                report.to.position
            ),
            TransitionOutcome::Cancelled(report) => log::info!(
                "Transition {} cancelled after {} steps",
                handle.id(),
                report.steps
            ),
            TransitionOutcome::Failed(e) => {
                log::error!("Transition {} failed: {e}", handle.id());
            }
            TransitionOutcome::Abandoned => {
                log::warn!("Transition {} abandoned", handle.id());
            }
        }
    }
    resolved
}

/// A car with four wheels and a shadow plane, plus a floating logo.
///
/// The shadow plane is excluded from framing so the car is measured by its
/// body and wheels only.
fn showroom(
    options: &Options,
) -> Result<(SceneGraph, NodeId), CameramanError> {
    let mut graph = SceneGraph::with_max_depth(options.scene.max_depth);
    let scene = graph.add_scene("showroom");

    let car = graph.add_group(scene, "car")?;
    let _ = graph.add_mesh(
        car,
        "body",
        Aabb::from_center_size(
            Vec3::new(0.0, 0.9, 0.0),
            Vec3::new(4.4, 1.3, 1.9),
        ),
    )?;
    let wheel = Aabb::from_center_size(Vec3::ZERO, Vec3::new(0.7, 0.7, 0.25));
    for (name, x, z) in [
        ("wheel_fl", 1.4, 0.85),
        ("wheel_fr", 1.4, -0.85),
        ("wheel_rl", -1.4, 0.85),
        ("wheel_rr", -1.4, -0.85),
    ] {
        let id = graph.add_mesh(car, name, wheel)?;
        let offset = Vec3::new(x, 0.35, z);
        graph.set_transform(id, Transform::from_translation(offset))?;
    }
    let shadow = graph.add_mesh(
        car,
        "shadow",
        Aabb::from_center_size(Vec3::ZERO, Vec3::new(12.0, 0.0, 12.0)),
    )?;
    graph.set_exclude_from_box(shadow, Some(true))?;

    let logo = graph.add_mesh(
        scene,
        "logo",
        Aabb::from_center_size(Vec3::ZERO, Vec3::new(2.0, 0.5, 0.05)),
    )?;
    graph.set_transform(
        logo,
        Transform {
            translation: Vec3::new(0.0, 3.5, -3.0),
            rotation: Quat::from_rotation_y(0.3),
            scale: Vec3::ONE,
        },
    )?;

    log::debug!("Showroom built with {} nodes", graph.len());
    Ok((graph, scene))
}
