use boot_context::EcDevice;

/// The devices this boot's sync engine invocation should consider.
///
/// Replaces a compile-time PD-sync toggle: callers build this from whatever
/// board configuration they have (a PD controller may simply not exist on a
/// given platform), and the engine additionally honors
/// `gbb_flags.disable_pd_software_sync` when iterating.
#[derive(Debug, Clone, Default)]
pub struct DeviceSet(Vec<EcDevice>);

impl DeviceSet {
    pub fn ec_only() -> Self {
        Self(vec![EcDevice::Ec])
    }

    pub fn ec_and_pd() -> Self {
        Self(vec![EcDevice::Ec, EcDevice::Pd])
    }

    pub fn none() -> Self {
        Self(Vec::new())
    }

    pub fn iter(&self) -> impl Iterator<Item = EcDevice> + '_ {
        self.0.iter().copied()
    }
}
