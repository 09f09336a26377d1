//! Main line follower executable entry point.
//!
//! # Architecture
//!
//! The general execution methodology consists of:
//!
//!     - Load parameters and initialise logging
//!     - Initialise the equipment for the selected backend
//!     - Main loop, until a stop is requested:
//!         - FollowCtrl step, which observes the line if needed and commands the drive
//!         - Cycle pacing
//!     - Shutdown: stop the drive and center the camera, on every exit path

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{
    eyre::{eyre, WrapErr},
    Result,
};
use log::{debug, error, info, warn};
use std::{
    thread,
    time::{Duration, Instant},
};

// Internal
use lfr_lib::{
    cam::SyntheticCam,
    follow_ctrl::{
        FollowCtrl, FollowCtrlError, FollowCtrlParams, FollowEqpt, FollowMode, LogSink,
        StepStatus,
    },
    line_det::{CamLineSensor, LineDetector},
    mech::{sim, MechParams},
    odom::Odometry,
    params::{Backend, LfrExecParams},
};
use util::{
    host,
    logger::logger_init,
    module::State,
    session::Session,
    time::{StopSignal, SysClock},
};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

const EXEC_NAME: &str = "lfr_exec";

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<()> {
    color_eyre::install()?;

    // ---- EARLY INITIALISATION ----

    let exec_params: LfrExecParams =
        util::params::load("lfr_exec.toml").wrap_err("Could not load exec params")?;

    let log_level = exec_params
        .log_level_filter()
        .ok_or_else(|| eyre!("Unknown log level \"{}\"", exec_params.log_level))?;
    let cycle_period = exec_params.cycle_period().ok_or_else(|| {
        eyre!(
            "Cycle period must be positive, found {} s",
            exec_params.cycle_period_s
        )
    })?;

    // Initialise session
    let session = if exec_params.log_to_file {
        Session::with_dir(EXEC_NAME, "sessions")
    } else {
        Session::new(EXEC_NAME)
    }
    .wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(log_level, &session).wrap_err("Failed to initialise logging")?;

    // Log information on this execution.
    info!("Line Follower Rover Executable\n");
    info!(
        "Running on: {:#?}",
        host::get_uname().wrap_err("Failed to get host information")?
    );
    if let Some(ref root) = session.session_root {
        info!("Session directory: {:?}\n", root);
    }

    // ---- STOP SIGNAL ----

    let stop = StopSignal::new();
    {
        let stop = stop.clone();
        ctrlc::set_handler(move || stop.raise())
            .wrap_err("Failed to set the interrupt handler")?;
    }

    // ---- INITIALISE MODULES ----

    info!("Initialising modules...");

    let mut line_det = LineDetector::default();
    line_det
        .init("line_det.toml", &session)
        .wrap_err("Failed to initialise LineDet")?;
    info!("LineDet init complete");

    let follow_params: FollowCtrlParams =
        util::params::load("follow_ctrl.toml").wrap_err("Could not load FollowCtrl params")?;

    let mech_params: MechParams =
        util::params::load("mech.toml").wrap_err("Could not load mech params")?;
    mech_params
        .validate()
        .wrap_err("Mech parameters are invalid")?;

    // ---- INITIALISE EQUIPMENT ----

    let (eqpt, odometry) = match exec_params.backend {
        Backend::Hardware => hardware_eqpt(&exec_params, &mech_params, line_det, &stop)?,
        Backend::Sim => sim_eqpt(&exec_params, &mech_params, line_det, &stop),
    };
    info!("{:?} equipment initialised", exec_params.backend);

    let mut follow_ctrl = FollowCtrl::new(
        follow_params,
        eqpt,
        Box::new(SysClock::new(stop.clone())),
        Box::new(LogSink),
    )
    .wrap_err("Failed to initialise FollowCtrl")?;
    if let Some(odometry) = odometry {
        follow_ctrl = follow_ctrl.with_odometry(odometry);
    }
    info!("FollowCtrl init complete");

    info!("Module initialisation complete\n");

    // ---- MAIN LOOP ----

    let result = run(&mut follow_ctrl, &stop, cycle_period);

    // ---- SHUTDOWN ----

    match result {
        Ok(()) => info!("Stop requested, shutting down"),
        Err(ref e) => error!("Shutting down after error: {:#}", e),
    }

    follow_ctrl.shutdown();

    info!("End of execution");

    result
}

/// Step the controller once per cycle until a stop is requested.
fn run(follow_ctrl: &mut FollowCtrl, stop: &StopSignal, cycle_period: Duration) -> Result<()> {
    follow_ctrl
        .start()
        .wrap_err("Failed to start FollowCtrl")?;

    info!("Beginning main loop\n");

    while !stop.is_raised() {
        let cycle_start_instant = Instant::now();
        let mode = follow_ctrl.mode();

        match follow_ctrl.step() {
            Ok(StepStatus::Continue) => (),
            Ok(StepStatus::Interrupted) => break,
            Err(FollowCtrlError::LineLost(cycles)) => {
                return Err(eyre!("Line lost, gave up after {} recovery cycles", cycles))
            }
            Err(e) => return Err(e).wrap_err("Error during FollowCtrl processing"),
        }

        // ---- CYCLE MANAGEMENT ----

        let cycle_dur = Instant::now() - cycle_start_instant;

        match cycle_period.checked_sub(cycle_dur) {
            Some(d) => thread::sleep(d),
            // Turns block for the whole pivot so are expected to overrun
            None if mode == FollowMode::Turning => debug!(
                "Turn took {:.03} s",
                cycle_dur.as_secs_f64()
            ),
            None => warn!(
                "Cycle overran by {:.06} s",
                cycle_dur.as_secs_f64() - cycle_period.as_secs_f64()
            ),
        }
    }

    Ok(())
}

/// Simulated pins and a synthetic camera.
fn sim_eqpt(
    exec_params: &LfrExecParams,
    mech_params: &MechParams,
    line_det: LineDetector,
    stop: &StopSignal,
) -> (FollowEqpt, Option<Odometry>) {
    let cam = SyntheticCam::new(
        exec_params.cam.frame_width,
        exec_params.cam.frame_height,
        exec_params.sim.line_x_px,
        exec_params.sim.line_width_px,
    );

    let eqpt = FollowEqpt {
        sensor: Box::new(CamLineSensor::new(Box::new(cam), line_det)),
        drive: Box::new(sim::sim_drive(mech_params)),
        heading: Box::new(sim::sim_heading(mech_params, stop.clone())),
    };

    (eqpt, None)
}

/// Raspberry Pi GPIO pins and the V4L2 camera.
#[cfg(all(target_os = "linux", any(target_arch = "arm", target_arch = "aarch64")))]
fn hardware_eqpt(
    exec_params: &LfrExecParams,
    mech_params: &MechParams,
    line_det: LineDetector,
    stop: &StopSignal,
) -> Result<(FollowEqpt, Option<Odometry>)> {
    use lfr_lib::{cam::V4lCam, mech::rpi::RpiMech};

    let cam = V4lCam::open(&exec_params.cam).wrap_err("Failed to open the camera")?;
    info!("Camera initialised");

    let mech = RpiMech::init(mech_params, stop.clone())
        .wrap_err("Failed to initialise the GPIO pins")?;
    info!("Mechanisms initialised");

    let eqpt = FollowEqpt {
        sensor: Box::new(CamLineSensor::new(Box::new(cam), line_det)),
        drive: Box::new(mech.drive),
        heading: Box::new(mech.heading),
    };

    Ok((eqpt, mech.odometry))
}

#[cfg(not(all(target_os = "linux", any(target_arch = "arm", target_arch = "aarch64"))))]
fn hardware_eqpt(
    _exec_params: &LfrExecParams,
    _mech_params: &MechParams,
    _line_det: LineDetector,
    _stop: &StopSignal,
) -> Result<(FollowEqpt, Option<Odometry>)> {
    Err(eyre!(
        "The hardware backend is only available on a Raspberry Pi, use the sim backend instead"
    ))
}
