// Copyright (c) 2026 rezky_nightky

//! Where on the surface drops are allowed to pool.

use crate::geometry::{ScreenRect, Vec2};

/// Identifier of the main taskbar strip.
pub const PRIMARY_STRIP_ID: &str = "Shell_TrayWnd";
/// Identifier of the taskbar strip on a secondary display.
pub const SECONDARY_STRIP_ID: &str = "Shell_SecondaryTrayWnd";

/// Only this many units below the strip's top edge collect water.
pub const ACTIVE_BAND_HEIGHT: i32 = 10;
/// A strip whose top edge is further than this above the surface bottom is not a bottom taskbar.
pub const BOTTOM_SLACK: i32 = 100;

/// Read-only view of the environment hosting the surface.
pub trait HostQuery {
    /// Screen rectangle of the surface puddles are drawn on.
    fn surface_rect(&self) -> ScreenRect;

    /// Screen rectangle of a system UI element, `None` when it does not exist.
    fn find_element(&self, id: &str) -> Option<ScreenRect>;
}

/// The taskbar rectangle in surface-local coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TaskbarRegion {
    pub screen: ScreenRect,
    pub local: ScreenRect,
}

impl TaskbarRegion {
    /// Locates the taskbar through `host`, trying the primary strip before the secondary one.
    ///
    /// Returns `None` when neither is found or when the strip is not docked at the
    /// bottom of the surface.
    pub fn resolve(host: &dyn HostQuery) -> Option<Self> {
        let surface = host.surface_rect();
        let Some(screen) = host
            .find_element(PRIMARY_STRIP_ID)
            .or_else(|| host.find_element(SECONDARY_STRIP_ID))
        else {
            log::warn!("no taskbar strip found, puddles disabled");
            return None;
        };

        if screen.top <= surface.bottom - BOTTOM_SLACK {
            log::warn!(
                "taskbar at {:?} is not docked at the bottom of {:?}, puddles disabled",
                screen,
                surface
            );
            return None;
        }

        let local = screen.normalized(surface.left, surface.top);
        log::info!("taskbar resolved at {:?} (local {:?})", screen, local);
        Some(Self { screen, local })
    }

    /// True when `pos` lies in the top band of the strip, edges included.
    pub fn contains(&self, pos: Vec2) -> bool {
        let top = self.local.top as f32;
        pos.x >= self.local.left as f32
            && pos.x <= self.local.right as f32
            && pos.y >= top
            && pos.y <= top + ACTIVE_BAND_HEIGHT as f32
    }
}


#[cfg(test)]
mod tests {
    use super::fake::FakeHost;
    use super::*;

    #[test]
    fn resolves_primary_and_normalizes_to_surface_origin() {
        let host = FakeHost::with_bottom_taskbar(1920, 0);
        let region = TaskbarRegion::resolve(&host).expect("taskbar present");
        assert_eq!(region.local, ScreenRect::new(0, 1040, 1920, 1080));
        assert_eq!(region.screen.left, 1920);
    }

    #[test]
    fn falls_back_to_secondary_strip() {
        let mut host = FakeHost::with_bottom_taskbar(0, 0);
        let (_, bar) = host.elements.remove(0);
        host.elements.push((SECONDARY_STRIP_ID, bar));
        assert!(TaskbarRegion::resolve(&host).is_some());
    }

    #[test]
    fn primary_wins_over_secondary() {
        let mut host = FakeHost::with_bottom_taskbar(0, 0);
        host.elements
            .push((SECONDARY_STRIP_ID, ScreenRect::new(0, 1060, 100, 1080)));
        let region = TaskbarRegion::resolve(&host).expect("taskbar present");
        assert_eq!(region.local.right, 1920);
    }

    #[test]
    fn missing_strip_yields_no_region() {
        assert!(TaskbarRegion::resolve(&FakeHost::without_taskbar()).is_none());
    }

    #[test]
    fn top_docked_strip_is_rejected() {
        let mut host = FakeHost::without_taskbar();
        host.elements
            .push((PRIMARY_STRIP_ID, ScreenRect::new(0, 0, 1920, 40)));
        assert!(TaskbarRegion::resolve(&host).is_none());
    }

    #[test]
    fn containment_is_the_top_band_only() {
        let region = TaskbarRegion::resolve(&FakeHost::with_bottom_taskbar(0, 0)).unwrap();
        assert!(region.contains(Vec2::new(0.0, 1040.0)));
        assert!(region.contains(Vec2::new(1920.0, 1050.0)));
        assert!(region.contains(Vec2::new(500.0, 1045.5)));
        assert!(!region.contains(Vec2::new(500.0, 1050.1)));
        assert!(!region.contains(Vec2::new(500.0, 1039.9)));
        assert!(!region.contains(Vec2::new(-0.1, 1045.0)));
        assert!(!region.contains(Vec2::new(1920.1, 1045.0)));
    }
}
