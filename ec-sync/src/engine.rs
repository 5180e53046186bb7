use crate::collaborators::EcIo;
use crate::devices::DeviceSet;
use crate::outcome::{EcOpError, SyncOutcome};
use boot_context::{BootContext, EcDevice, NvKey, NvStore, RecoveryReason, Slot};
use log::{debug, warn};

/// Maximum number of RO update attempts before giving up and asking for a
/// reboot rather than a recorded recovery reason.
const RO_RETRIES: u32 = 2;

fn record_recovery<N: NvStore>(ctx: &mut BootContext<N>, reason: RecoveryReason) -> SyncOutcome {
    warn!("ec-sync: recording recovery reason {reason:?}");
    if let Err(e) = ctx.nv_store.set(NvKey::RecoveryRequest, reason as u32) {
        warn!("ec-sync: failed to persist recovery reason: {e}");
    }
    let _ = ctx.nv_store.commit();
    SyncOutcome::Fatal(reason)
}

/// Digests an unsupported slot reports as "no image here" are treated as a
/// trivial match: the device is never scheduled for an update it cannot
/// perform.
fn hashes_match<E: EcIo>(ec: &mut E, dev: EcDevice, slot: Slot) -> Result<bool, RecoveryReason> {
    let current = match ec.hash_image(dev, slot) {
        Ok(h) => h,
        Err(boot_context::CollaboratorError::Unsupported) => return Ok(true),
        Err(_) => return Err(RecoveryReason::EcHashFailed),
    };
    let expected = match ec.expected_hash(dev, slot) {
        Ok(h) => h,
        Err(boot_context::CollaboratorError::Unsupported) => return Ok(true),
        Err(_) => return Err(RecoveryReason::EcExpectedHash),
    };
    if current.len() != expected.len() {
        return Err(RecoveryReason::EcHashSize);
    }
    Ok(constant_time_eq::constant_time_eq(&current, &expected))
}

/// Phase 1 — Diagnose. Decides what work, if any, is needed.
pub fn phase1<N: NvStore, E: EcIo>(
    ctx: &mut BootContext<N>,
    devices: &DeviceSet,
    ec: &mut E,
) -> SyncOutcome {
    if !ctx.shared_flags.ec_software_sync_enabled || ctx.gbb_flags.disable_ec_software_sync {
        debug!("ec-sync: phase1 skipped, software sync disabled");
        return SyncOutcome::Ok;
    }

    for dev in devices.iter() {
        if dev == EcDevice::Pd && ctx.gbb_flags.disable_pd_software_sync {
            continue;
        }

        debug!("ec-sync: phase1 querying running image for {dev:?}");
        let in_rw = match ec.running_rw(dev) {
            Ok(in_rw) => in_rw,
            Err(_) => {
                if ctx.in_recovery_mode() {
                    // Treated as "not in RW" below; recovery mode never
                    // fails this boot over a query it doesn't strictly need.
                    false
                } else {
                    return record_recovery(ctx, RecoveryReason::EcUnknownImage);
                }
            }
        };
        ctx.scratch_flags.set_in_rw(dev, in_rw);

        if ctx.in_recovery_mode() {
            if in_rw {
                let reason = ctx.recovery_reason;
                if let Err(e) = ctx.nv_store.set(NvKey::RecoveryRequest, reason) {
                    warn!("ec-sync: failed to preserve recovery reason: {e}");
                }
                let _ = ctx.nv_store.commit();
                return SyncOutcome::NeedsReboot;
            }
            // Stop here for this device: no hashing, no updates in recovery.
            continue;
        }

        match hashes_match(ec, dev, Slot::Rw) {
            Ok(true) => {}
            Ok(false) => ctx.scratch_flags.set_rw_needs_update(dev, true),
            Err(reason) => return record_recovery(ctx, reason),
        }

        let try_ro_sync = ctx.nv_store.get(NvKey::TryRoSync).unwrap_or(0) != 0;
        if dev == EcDevice::Ec && try_ro_sync && !ctx.shared_flags.fw_write_protect_enabled {
            match hashes_match(ec, dev, Slot::Ro) {
                Ok(true) => {}
                Ok(false) => ctx.scratch_flags.ec_ro_needs_update = true,
                Err(reason) => return record_recovery(ctx, reason),
            }
        }
    }

    for dev in devices.iter() {
        if ctx.scratch_flags.rw_needs_update(dev) && ctx.scratch_flags.in_rw(dev) {
            debug!("ec-sync: {dev:?} RW needs update but is currently active, reboot to RO");
            return SyncOutcome::NeedsReboot;
        }
    }

    SyncOutcome::Ok
}

/// `true` if the pending work is known to take long enough that a caller
/// should show a "please wait" screen before invoking [`phase2`].
pub fn ec_will_update_slowly<N: NvStore>(ctx: &BootContext<N>) -> bool {
    ctx.shared_flags.ec_slow_update && ctx.scratch_flags.any_update_needed()
}

fn map_op_err<N: NvStore>(
    ctx: &mut BootContext<N>,
    err: EcOpError,
    reason: RecoveryReason,
) -> SyncOutcome {
    match err {
        EcOpError::RebootToRoRequired => SyncOutcome::NeedsReboot,
        EcOpError::Other => record_recovery(ctx, reason),
    }
}

fn sync_one_ec<N: NvStore, E: EcIo>(
    ctx: &mut BootContext<N>,
    ec: &mut E,
    dev: EcDevice,
) -> SyncOutcome {
    if ctx.scratch_flags.rw_needs_update(dev) {
        debug!("ec-sync: updating RW image on {dev:?}");
        let image = match ec.expected_image(dev, Slot::Rw) {
            Ok(image) => image,
            Err(_) => return record_recovery(ctx, RecoveryReason::EcExpectedImage),
        };
        if let Err(e) = ec.update_image(dev, Slot::Rw, &image) {
            return map_op_err(ctx, e, RecoveryReason::EcUpdate);
        }
        match hashes_match(ec, dev, Slot::Rw) {
            Ok(true) => ctx.scratch_flags.set_rw_needs_update(dev, false),
            Ok(false) => return record_recovery(ctx, RecoveryReason::EcUpdate),
            Err(reason) => return record_recovery(ctx, reason),
        }
    }

    if !ctx.scratch_flags.in_rw(dev) {
        debug!("ec-sync: jumping {dev:?} to RW");
        if let Err(e) = ec.jump_to_rw(dev) {
            return map_op_err(ctx, e, RecoveryReason::EcJumpRw);
        }
        ctx.scratch_flags.set_in_rw(dev, true);
    }

    if dev == EcDevice::Ec && ctx.scratch_flags.ec_ro_needs_update {
        debug!("ec-sync: updating RO image on EC");
        let saved = ctx.nv_store.get(NvKey::RecoveryRequest).unwrap_or(0);
        let _ = ctx.nv_store.set(NvKey::TryRoSync, 0);

        let mut succeeded = false;
        for attempt in 0..RO_RETRIES {
            let image = match ec.expected_image(dev, Slot::Ro) {
                Ok(image) => image,
                Err(_) => return record_recovery(ctx, RecoveryReason::EcExpectedImage),
            };
            match ec.update_image(dev, Slot::Ro, &image) {
                Ok(()) => {
                    let _ = ctx.nv_store.set(NvKey::RecoveryRequest, saved);
                    succeeded = true;
                    break;
                }
                Err(EcOpError::RebootToRoRequired) => return SyncOutcome::NeedsReboot,
                Err(EcOpError::Other) => {
                    warn!("ec-sync: RO update attempt {attempt} failed, retrying");
                }
            }
        }
        if !succeeded {
            return SyncOutcome::NeedsReboot;
        }
        ctx.scratch_flags.ec_ro_needs_update = false;
    }

    debug!("ec-sync: protecting {dev:?}");
    if let Err(e) = ec.protect(dev, Slot::Ro) {
        return map_op_err(ctx, e, RecoveryReason::EcProtect);
    }
    if let Err(e) = ec.protect(dev, Slot::Rw) {
        return map_op_err(ctx, e, RecoveryReason::EcProtect);
    }

    debug!("ec-sync: disabling further jumps on {dev:?}");
    if ec.disable_jump(dev).is_err() {
        return record_recovery(ctx, RecoveryReason::EcSoftwareSync);
    }

    SyncOutcome::Ok
}

/// Phase 2 — Execute. Only valid to call after [`phase1`] returns
/// `SyncOutcome::Ok` and the boot is not in recovery mode.
pub fn phase2<N: NvStore, E: EcIo>(
    ctx: &mut BootContext<N>,
    devices: &DeviceSet,
    ec: &mut E,
) -> SyncOutcome {
    if !ctx.shared_flags.ec_software_sync_enabled || ctx.gbb_flags.disable_ec_software_sync {
        return SyncOutcome::Ok;
    }
    debug_assert!(!ctx.in_recovery_mode(), "phase2 must not run in recovery mode");

    for dev in devices.iter() {
        if dev == EcDevice::Pd && ctx.gbb_flags.disable_pd_software_sync {
            continue;
        }
        let outcome = sync_one_ec(ctx, ec, dev);
        if !outcome.is_ok() {
            return outcome;
        }
    }

    SyncOutcome::Ok
}

/// Phase 3 — Finalize. Notifies the EC that vboot has completed and honors a
/// pending battery-cutoff request.
pub fn phase3<N: NvStore, E: EcIo>(ctx: &mut BootContext<N>, ec: &mut E) -> SyncOutcome {
    if let Err(e) = ec.vboot_done(ctx.in_recovery_mode()) {
        warn!("ec-sync: vboot_done failed: {e}");
    }

    let cutoff_requested = ctx.nv_store.get(NvKey::BatteryCutoffRequest).unwrap_or(0) != 0;
    if cutoff_requested {
        debug!("ec-sync: battery cutoff requested, shutting down");
        let _ = ctx.nv_store.set(NvKey::BatteryCutoffRequest, 0);
        let _ = ctx.nv_store.commit();
        if let Err(e) = ec.battery_cutoff() {
            warn!("ec-sync: battery_cutoff failed: {e}");
        }
        return SyncOutcome::Shutdown;
    }

    SyncOutcome::Ok
}
