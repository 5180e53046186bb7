use crate::flags::{GbbFlags, ScratchFlags, SharedFlags};
use crate::nv::NvStore;

/// The per-boot mutable state shared by the EC sync engine and the boot UI.
///
/// Constructed by the caller once policy (GBB, FWMP-derived shared flags) and
/// the NV store handle are available, then handed by reference to whichever
/// flow runs this boot. `recovery_reason` is immutable after construction for
/// the duration of phase selection; `scratch_flags` is owned and mutated only
/// by the EC sync engine.
pub struct BootContext<N: NvStore> {
    /// Non-zero iff this boot entered recovery mode.
    pub recovery_reason: u32,
    pub scratch_flags: ScratchFlags,
    pub shared_flags: SharedFlags,
    pub gbb_flags: GbbFlags,
    pub nv_store: N,
}

impl<N: NvStore> BootContext<N> {
    pub fn new(
        recovery_reason: u32,
        shared_flags: SharedFlags,
        gbb_flags: GbbFlags,
        nv_store: N,
    ) -> Self {
        Self {
            recovery_reason,
            scratch_flags: ScratchFlags::default(),
            shared_flags,
            gbb_flags,
            nv_store,
        }
    }

    pub fn in_recovery_mode(&self) -> bool {
        self.recovery_reason != 0
    }
}
