//! Screen identifiers used by the developer and recovery flows. Opaque
//! beyond the numeric id; a real `Display` implementation maps these to
//! whatever asset catalog the platform ships.

use crate::collaborators::ScreenId;

pub const SCREEN_DEVELOPER_WARNING: ScreenId = ScreenId(1);
pub const SCREEN_TO_NORM: ScreenId = ScreenId(2);
pub const SCREEN_TO_NORM_CONFIRMED: ScreenId = ScreenId(3);
pub const SCREEN_OS_BROKEN: ScreenId = ScreenId(4);
pub const SCREEN_RECOVERY: ScreenId = ScreenId(5);
pub const SCREEN_TO_DEV: ScreenId = ScreenId(6);
