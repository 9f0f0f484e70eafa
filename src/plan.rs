//! Size tables and the output directory layout.
//!
//! An [`AssetPlan`] is plain data: which sizes exist for which platform. It is
//! serializable so a plan can be dumped, reviewed or loaded as JSON:
//!
//! ```
//! use spyll_assets::AssetPlan;
//!
//! let plan = AssetPlan::default();
//! let json = plan.to_json_pretty().unwrap();
//! let restored = AssetPlan::from_json(&json).unwrap();
//! assert_eq!(plan, restored);
//! ```
//!
//! A [`ProjectLayout`] turns a project root into the concrete directories the
//! native packaging tools read from. Combining the two yields [`RenderJob`]s.

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::icon::SizePx;

// ============================================================================
// Plan Tables
// ============================================================================

/// One Android launcher density bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DensityIcon {
    pub density: String,
    pub size: u32,
}

/// Screen orientation of a splash drawable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Orientation {
    Portrait,
    Landscape,
}

/// One Android splash drawable bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplashBucket {
    pub orientation: Orientation,
    pub density: String,
    pub width: u32,
    pub height: u32,
}

impl SplashBucket {
    /// Name of the `res/` subdirectory (`drawable-hdpi`, `drawable-land-hdpi`).
    pub fn directory(&self) -> String {
        match self.orientation {
            Orientation::Portrait => format!("drawable-{}", self.density),
            Orientation::Landscape => format!("drawable-land-{}", self.density),
        }
    }
}

/// One iOS icon: a nominal point size at a pixel-density scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IosIcon {
    pub size: f32,
    pub scale: u32,
}

impl IosIcon {
    /// Pixel side length, truncated (83.5pt @2x is 167px).
    pub fn pixels(&self) -> u32 {
        (self.size * self.scale as f32) as u32
    }

    /// `icon-20@2x.png`, `icon-83.5@2x.png`.
    pub fn filename(&self) -> String {
        format!("icon-{}@{}x.png", self.nominal(), self.scale)
    }

    /// The nominal size without a trailing `.0` for integral sizes.
    pub fn nominal(&self) -> String {
        self.size.to_string()
    }
}

/// Every size the batch produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetPlan {
    /// The text drawn on every asset.
    pub text: String,
    pub android_icons: Vec<DensityIcon>,
    pub android_splash: Vec<SplashBucket>,
    pub web_icon_sizes: Vec<u32>,
    pub favicon_size: u32,
    pub apple_touch_size: u32,
    pub og_image: SizePx,
    pub ios_icons: Vec<IosIcon>,
}

impl Default for AssetPlan {
    fn default() -> Self {
        let densities = ["mdpi", "hdpi", "xhdpi", "xxhdpi", "xxxhdpi"];
        let icon_sizes = [48, 72, 96, 144, 192];
        let portrait = [(320, 480), (480, 800), (720, 1280), (960, 1600), (1280, 1920)];

        let android_icons = densities
            .iter()
            .zip(icon_sizes)
            .map(|(density, size)| DensityIcon {
                density: density.to_string(),
                size,
            })
            .collect();

        let mut android_splash = Vec::new();
        for orientation in [Orientation::Portrait, Orientation::Landscape] {
            for (density, (w, h)) in densities.iter().zip(portrait) {
                let (width, height) = match orientation {
                    Orientation::Portrait => (w, h),
                    Orientation::Landscape => (h, w),
                };
                android_splash.push(SplashBucket {
                    orientation,
                    density: density.to_string(),
                    width,
                    height,
                });
            }
        }

        let ios_icons = [
            (20.0, 1),
            (20.0, 2),
            (20.0, 3),
            (29.0, 1),
            (29.0, 2),
            (29.0, 3),
            (40.0, 1),
            (40.0, 2),
            (40.0, 3),
            (60.0, 2),
            (60.0, 3),
            (76.0, 1),
            (76.0, 2),
            (83.5, 2),
            (1024.0, 1),
        ]
        .into_iter()
        .map(|(size, scale)| IosIcon { size, scale })
        .collect();

        Self {
            text: "SPYLL".to_string(),
            android_icons,
            android_splash,
            web_icon_sizes: vec![16, 32, 72, 96, 128, 144, 152, 192, 384, 512],
            favicon_size: 32,
            apple_touch_size: 180,
            og_image: SizePx::new(1200, 630),
            ios_icons,
        }
    }
}

impl AssetPlan {
    /// Serializes the plan to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes the plan to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes a plan from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Launcher, round launcher and adaptive foreground per density.
    pub fn android_icon_jobs(&self, layout: &ProjectLayout) -> Vec<RenderJob> {
        self.android_icons
            .iter()
            .flat_map(|bucket| {
                let dir = layout.android_res().join(format!("mipmap-{}", bucket.density));
                let size = SizePx::square(bucket.size);
                [
                    (JobKind::Icon, "ic_launcher.png"),
                    (JobKind::RoundIcon, "ic_launcher_round.png"),
                    (JobKind::Icon, "ic_launcher_foreground.png"),
                ]
                .map(|(kind, name)| self.job(kind, size, dir.join(name)))
            })
            .collect()
    }

    pub fn android_splash_jobs(&self, layout: &ProjectLayout) -> Vec<RenderJob> {
        self.android_splash
            .iter()
            .map(|bucket| {
                self.job(
                    JobKind::Splash,
                    SizePx::new(bucket.width, bucket.height),
                    layout.android_res().join(bucket.directory()).join("splash.png"),
                )
            })
            .collect()
    }

    /// PWA icons, favicon, Apple touch icon and the social preview image.
    pub fn web_jobs(&self, layout: &ProjectLayout) -> Vec<RenderJob> {
        let icons_dir = layout.app_icons_dir();
        let mut jobs: Vec<RenderJob> = self
            .web_icon_sizes
            .iter()
            .map(|&n| {
                self.job(
                    JobKind::Icon,
                    SizePx::square(n),
                    icons_dir.join(format!("icon-{n}x{n}.png")),
                )
            })
            .collect();

        jobs.push(self.job(
            JobKind::Icon,
            SizePx::square(self.favicon_size),
            layout.public_dir().join("favicon.ico"),
        ));
        jobs.push(self.job(
            JobKind::Icon,
            SizePx::square(self.apple_touch_size),
            layout.public_dir().join("apple-touch-icon.png"),
        ));
        jobs.push(self.job(JobKind::Splash, self.og_image, icons_dir.join("og-image.png")));
        jobs
    }

    /// One job per iOS icon, paired with the entry it contributes to
    /// `Contents.json`.
    pub fn ios_jobs(&self, layout: &ProjectLayout) -> Vec<(RenderJob, IosIcon)> {
        let dir = layout.ios_icon_set();
        self.ios_icons
            .iter()
            .map(|icon| {
                let job = self.job(
                    JobKind::Icon,
                    SizePx::square(icon.pixels()),
                    dir.join(icon.filename()),
                );
                (job, *icon)
            })
            .collect()
    }

    fn job(&self, kind: JobKind, size: SizePx, path: PathBuf) -> RenderJob {
        RenderJob {
            text: self.text.clone(),
            kind,
            size,
            path,
        }
    }
}

// ============================================================================
// Render Jobs
// ============================================================================

/// Which render routine a job goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobKind {
    /// Rounded-rectangle icon with the wordmark.
    Icon,
    /// [`JobKind::Icon`] cropped to a circle.
    RoundIcon,
    /// Full-bleed splash screen.
    Splash,
}

/// A single image to render and write, consumed once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderJob {
    pub text: String,
    pub kind: JobKind,
    pub size: SizePx,
    pub path: PathBuf,
}

/// Fails with [`Error::DuplicateOutput`] on the first path written twice.
pub fn ensure_unique_paths<'a>(jobs: impl IntoIterator<Item = &'a RenderJob>) -> Result<()> {
    let mut seen = HashSet::new();
    for job in jobs {
        if !seen.insert(job.path.as_path()) {
            return Err(Error::DuplicateOutput {
                path: job.path.clone(),
            });
        }
    }
    Ok(())
}

// ============================================================================
// ProjectLayout
// ============================================================================

/// The project's output directory tree, rooted at one directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    root: PathBuf,
}

impl ProjectLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn public_dir(&self) -> PathBuf {
        self.root.join("public")
    }

    pub fn app_icons_dir(&self) -> PathBuf {
        self.public_dir().join("app-icons")
    }

    /// Brand font locations in order of preference.
    pub fn font_candidates(&self) -> Vec<PathBuf> {
        let fonts = self.public_dir().join("fonts");
        vec![fonts.join("Liquids.ttf"), fonts.join("Liquids.otf")]
    }

    pub fn android_res(&self) -> PathBuf {
        self.root.join("android/app/src/main/res")
    }

    /// The asset catalog that must already exist for iOS generation to run.
    pub fn ios_asset_catalog(&self) -> PathBuf {
        self.root.join("ios/App/App/Assets.xcassets")
    }

    pub fn ios_icon_set(&self) -> PathBuf {
        self.ios_asset_catalog().join("AppIcon.appiconset")
    }
}

impl fmt::Display for ProjectLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.root.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> ProjectLayout {
        ProjectLayout::new("/project")
    }

    #[test]
    fn default_plan_tables() {
        let plan = AssetPlan::default();
        assert_eq!(plan.text, "SPYLL");
        assert_eq!(plan.android_icons.len(), 5);
        assert_eq!(plan.android_icons[4].density, "xxxhdpi");
        assert_eq!(plan.android_icons[4].size, 192);
        assert_eq!(plan.android_splash.len(), 10);
        assert_eq!(plan.web_icon_sizes.len(), 10);
        assert_eq!(plan.ios_icons.len(), 15);
        assert_eq!(plan.og_image, SizePx::new(1200, 630));
    }

    #[test]
    fn splash_buckets_flip_for_landscape() {
        let plan = AssetPlan::default();
        let land = plan
            .android_splash
            .iter()
            .find(|b| b.orientation == Orientation::Landscape && b.density == "xhdpi")
            .unwrap();
        assert_eq!((land.width, land.height), (1280, 720));
        assert_eq!(land.directory(), "drawable-land-xhdpi");

        let port = &plan.android_splash[0];
        assert_eq!((port.width, port.height), (320, 480));
        assert_eq!(port.directory(), "drawable-mdpi");
    }

    #[test]
    fn ios_icon_names_and_pixels() {
        let icon = IosIcon { size: 83.5, scale: 2 };
        assert_eq!(icon.pixels(), 167);
        assert_eq!(icon.filename(), "icon-83.5@2x.png");

        let icon = IosIcon { size: 20.0, scale: 3 };
        assert_eq!(icon.pixels(), 60);
        assert_eq!(icon.filename(), "icon-20@3x.png");
    }

    #[test]
    fn android_icon_jobs_cover_three_variants() {
        let jobs = AssetPlan::default().android_icon_jobs(&layout());
        assert_eq!(jobs.len(), 15);
        assert_eq!(
            jobs[1].path,
            PathBuf::from("/project/android/app/src/main/res/mipmap-mdpi/ic_launcher_round.png")
        );
        assert_eq!(jobs[1].kind, JobKind::RoundIcon);
        assert!(jobs.iter().all(|j| j.size.is_square()));
    }

    #[test]
    fn web_jobs_paths() {
        let jobs = AssetPlan::default().web_jobs(&layout());
        let paths: Vec<_> = jobs.iter().map(|j| j.path.clone()).collect();
        assert!(paths.contains(&PathBuf::from("/project/public/app-icons/icon-16x16.png")));
        assert!(paths.contains(&PathBuf::from("/project/public/favicon.ico")));
        assert!(paths.contains(&PathBuf::from("/project/public/apple-touch-icon.png")));

        let og = jobs.last().unwrap();
        assert_eq!(og.path, PathBuf::from("/project/public/app-icons/og-image.png"));
        assert_eq!(og.kind, JobKind::Splash);
        assert_eq!(og.size, SizePx::new(1200, 630));
    }

    #[test]
    fn default_plan_paths_are_unique() {
        let plan = AssetPlan::default();
        let l = layout();
        let mut all = plan.android_icon_jobs(&l);
        all.extend(plan.android_splash_jobs(&l));
        all.extend(plan.web_jobs(&l));
        all.extend(plan.ios_jobs(&l).into_iter().map(|(job, _)| job));
        assert_eq!(all.len(), 15 + 10 + 13 + 15);
        ensure_unique_paths(&all).unwrap();
    }

    #[test]
    fn duplicate_paths_are_rejected() {
        let mut plan = AssetPlan::default();
        plan.web_icon_sizes = vec![32, 32];
        let jobs = plan.web_jobs(&layout());
        let err = ensure_unique_paths(&jobs).unwrap_err();
        assert!(matches!(err, Error::DuplicateOutput { .. }));
    }

    #[test]
    fn plan_json_round_trip() {
        let plan = AssetPlan::default();
        let json = plan.to_json().unwrap();
        assert!(json.contains("\"androidIcons\""));
        assert!(json.contains("\"landscape\""));
        assert_eq!(AssetPlan::from_json(&json).unwrap(), plan);
    }

    #[test]
    fn plan_from_partial_json_fails() {
        assert!(AssetPlan::from_json(r#"{"text":"X"}"#).is_err());
    }

    #[test]
    fn layout_paths() {
        let l = layout();
        assert_eq!(
            l.font_candidates(),
            vec![
                PathBuf::from("/project/public/fonts/Liquids.ttf"),
                PathBuf::from("/project/public/fonts/Liquids.otf"),
            ]
        );
        assert_eq!(
            l.ios_icon_set(),
            PathBuf::from("/project/ios/App/App/Assets.xcassets/AppIcon.appiconset")
        );
        assert_eq!(l.to_string(), "/project");
    }
}
