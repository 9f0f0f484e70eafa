//! The batch driver: renders every job of an [`AssetPlan`] and writes it.
//!
//! Steps run strictly in order (Android icons, Android splash screens, web
//! assets, iOS icons) and each job is rendered and written before the next
//! one starts. The first write failure aborts the batch.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::error::{Error, Result};
use crate::font::BrandFont;
use crate::manifest::{IconManifest, ManifestEntry};
use crate::plan::{ensure_unique_paths, AssetPlan, JobKind, ProjectLayout, RenderJob};
use crate::renderer::{write, AssetRenderer, Rendered};
use crate::style::{StyleSpec, TextFit};

// ============================================================================
// Reports
// ============================================================================

/// A stage of the batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    AndroidIcons,
    AndroidSplash,
    Web,
    Ios,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Step::AndroidIcons => "Android icons",
            Step::AndroidSplash => "Android splash screens",
            Step::Web => "Web assets",
            Step::Ios => "iOS icons",
        })
    }
}

/// What one step wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    pub step: Step,
    pub written: Vec<PathBuf>,
    /// Renders in this step that drew their text with the fallback font.
    pub fallback_renders: usize,
}

impl StepReport {
    fn new(step: Step) -> Self {
        Self {
            step,
            written: Vec::new(),
            fallback_renders: 0,
        }
    }
}

/// Outcome of a full batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub steps: Vec<StepReport>,
    /// Steps that did not run, with the reason.
    pub skipped: Vec<(Step, String)>,
}

impl Summary {
    pub fn files_written(&self) -> usize {
        self.steps.iter().map(|s| s.written.len()).sum()
    }

    pub fn fallback_renders(&self) -> usize {
        self.steps.iter().map(|s| s.fallback_renders).sum()
    }

    pub fn step(&self, step: Step) -> Option<&StepReport> {
        self.steps.iter().find(|s| s.step == step)
    }

    pub fn was_skipped(&self, step: Step) -> bool {
        self.skipped.iter().any(|(s, _)| *s == step)
    }

    /// Every path written, in write order.
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.steps
            .iter()
            .flat_map(|s| s.written.iter().map(PathBuf::as_path))
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "All assets generated successfully! ({} files)",
            self.files_written()
        )?;
        for report in &self.steps {
            writeln!(f, "  {}: {} files", report.step, report.written.len())?;
        }
        for (step, reason) in &self.skipped {
            writeln!(f, "  {step}: skipped ({reason})")?;
        }
        let fallbacks = self.fallback_renders();
        if fallbacks > 0 {
            writeln!(f, "  Warning: {fallbacks} images were drawn with the fallback font")?;
        }
        writeln!(f)?;
        writeln!(f, "Next steps:")?;
        writeln!(f, "  1. Run 'npx cap sync android' to sync assets")?;
        write!(f, "  2. Rebuild the APK with './gradlew assembleDebug'")
    }
}

// ============================================================================
// AssetGenerator
// ============================================================================

/// Runs an [`AssetPlan`] against a [`ProjectLayout`].
pub struct AssetGenerator {
    renderer: AssetRenderer,
    plan: AssetPlan,
    layout: ProjectLayout,
}

impl AssetGenerator {
    pub fn new(renderer: AssetRenderer, plan: AssetPlan, layout: ProjectLayout) -> Self {
        Self {
            renderer,
            plan,
            layout,
        }
    }

    pub fn plan(&self) -> &AssetPlan {
        &self.plan
    }

    pub fn layout(&self) -> &ProjectLayout {
        &self.layout
    }

    /// Runs all four steps.
    ///
    /// A missing iOS asset catalog skips the iOS step; every other failure
    /// aborts and is returned.
    pub fn run(&self) -> Result<Summary> {
        let mut summary = Summary::default();

        info!("Generating Android app icons...");
        let jobs = self.plan.android_icon_jobs(&self.layout);
        summary.steps.push(self.run_jobs(Step::AndroidIcons, &jobs)?);

        info!("Generating Android splash screens...");
        let jobs = self.plan.android_splash_jobs(&self.layout);
        summary.steps.push(self.run_jobs(Step::AndroidSplash, &jobs)?);

        info!("Generating web assets...");
        let jobs = self.plan.web_jobs(&self.layout);
        summary.steps.push(self.run_jobs(Step::Web, &jobs)?);

        info!("Generating iOS assets...");
        match self.generate_ios()? {
            Some(report) => summary.steps.push(report),
            None => summary
                .skipped
                .push((Step::Ios, "iOS directory not found".to_string())),
        }

        Ok(summary)
    }

    fn run_jobs(&self, step: Step, jobs: &[RenderJob]) -> Result<StepReport> {
        ensure_unique_paths(jobs)?;

        let mut report = StepReport::new(step);
        for job in jobs {
            let rendered = self.execute(job)?;
            if rendered.used_fallback() {
                report.fallback_renders += 1;
            }
            report.written.push(job.path.clone());
        }
        Ok(report)
    }

    /// Icons plus `Contents.json`, or `None` when there is no iOS project.
    fn generate_ios(&self) -> Result<Option<StepReport>> {
        let catalog = self.layout.ios_asset_catalog();
        if !catalog.is_dir() {
            warn!(
                "iOS directory not found at {}, skipping iOS assets",
                catalog.display()
            );
            return Ok(None);
        }

        let icon_set = self.layout.ios_icon_set();
        fs::create_dir_all(&icon_set).map_err(|source| Error::CreateDir {
            path: icon_set.clone(),
            source,
        })?;

        let jobs = self.plan.ios_jobs(&self.layout);
        let (render_jobs, icons): (Vec<_>, Vec<_>) = jobs.into_iter().unzip();

        let mut report = self.run_jobs(Step::Ios, &render_jobs)?;
        let mut manifest = IconManifest::new();
        for icon in &icons {
            manifest.push(ManifestEntry::from(icon));
        }

        let contents = icon_set.join("Contents.json");
        manifest.write(&contents)?;
        info!("  Contents.json ({} images)", manifest.len());
        report.written.push(contents);

        Ok(Some(report))
    }

    /// Renders one job and writes it to its path.
    fn execute(&self, job: &RenderJob) -> Result<Rendered> {
        let rendered = match job.kind {
            JobKind::Icon => {
                self.renderer
                    .render_icon(job.size.width, &job.text, TextFit::Wordmark)
            }
            JobKind::RoundIcon => {
                self.renderer
                    .render_round_icon(job.size.width, &job.text, TextFit::Wordmark)
            }
            JobKind::Splash => {
                self.renderer
                    .render_splash(job.size.width, job.size.height, &job.text)
            }
        };

        write(&rendered.image.data, &job.path)?;
        info!("  {} ({})", short_name(&job.path), job.size);
        Ok(rendered)
    }
}

/// `mipmap-hdpi/ic_launcher.png` for log lines.
fn short_name(path: &Path) -> String {
    let file = path.file_name().unwrap_or_default().to_string_lossy();
    match path.parent().and_then(Path::file_name) {
        Some(dir) => format!("{}/{file}", dir.to_string_lossy()),
        None => file.into_owned(),
    }
}

/// Generates every asset of the default plan under `root`.
///
/// The brand font must exist under `public/fonts/`; otherwise this fails with
/// [`Error::FontMissing`] before anything is rendered.
pub fn generate(root: &Path) -> Result<Summary> {
    let layout = ProjectLayout::new(root);
    info!("Project root: {layout}");

    let font_path = BrandFont::locate(&layout.font_candidates())?;
    info!("Font path: {}", font_path.display());
    let font = BrandFont::open(&font_path)?;

    let renderer = AssetRenderer::new(StyleSpec::brand(), font);
    AssetGenerator::new(renderer, AssetPlan::default(), layout).run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::FALLBACK_FONT;
    use crate::icon::SizePx;
    use crate::plan::DensityIcon;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    /// A project root with the brand font installed.
    fn project() -> TempDir {
        let dir = TempDir::new().unwrap();
        let fonts = dir.path().join("public/fonts");
        fs::create_dir_all(&fonts).unwrap();
        fs::write(fonts.join("Liquids.ttf"), FALLBACK_FONT).unwrap();
        dir
    }

    fn snapshot(root: &Path, summary: &Summary) -> BTreeMap<PathBuf, Vec<u8>> {
        summary
            .paths()
            .map(|p| (p.strip_prefix(root).unwrap().to_path_buf(), fs::read(p).unwrap()))
            .collect()
    }

    fn small_plan() -> AssetPlan {
        let mut plan = AssetPlan::default();
        plan.android_icons = vec![DensityIcon {
            density: "mdpi".to_string(),
            size: 48,
        }];
        plan.android_splash.truncate(1);
        plan.web_icon_sizes = vec![16];
        plan.og_image = SizePx::new(120, 63);
        plan.ios_icons.truncate(2);
        plan
    }

    fn small_generator(root: &Path, font_bytes: Vec<u8>) -> AssetGenerator {
        let renderer = AssetRenderer::new(
            StyleSpec::brand(),
            BrandFont::from_bytes(font_bytes).unwrap(),
        );
        AssetGenerator::new(renderer, small_plan(), ProjectLayout::new(root))
    }

    #[test]
    fn missing_font_aborts_before_rendering() {
        let dir = TempDir::new().unwrap();
        let err = generate(dir.path()).unwrap_err();
        match err {
            Error::FontMissing { path } => {
                assert!(path.ends_with("public/fonts/Liquids.ttf"));
            }
            other => panic!("expected FontMissing, got {other:?}"),
        }
        assert!(!dir.path().join("android").exists());
        assert!(!dir.path().join("public/app-icons").exists());
    }

    #[test]
    fn otf_font_is_accepted() {
        let dir = TempDir::new().unwrap();
        let fonts = dir.path().join("public/fonts");
        fs::create_dir_all(&fonts).unwrap();
        fs::write(fonts.join("Liquids.otf"), FALLBACK_FONT).unwrap();

        let path = BrandFont::locate(&ProjectLayout::new(dir.path()).font_candidates()).unwrap();
        assert!(path.ends_with("Liquids.otf"));
    }

    #[test]
    fn full_batch_without_ios_project() {
        let dir = project();
        let summary = generate(dir.path()).unwrap();

        assert!(summary.was_skipped(Step::Ios));
        assert!(summary.step(Step::Ios).is_none());
        assert_eq!(summary.step(Step::AndroidIcons).unwrap().written.len(), 15);
        assert_eq!(summary.step(Step::AndroidSplash).unwrap().written.len(), 10);
        assert_eq!(summary.step(Step::Web).unwrap().written.len(), 13);
        assert_eq!(summary.files_written(), 38);
        assert_eq!(summary.fallback_renders(), 0);
        assert!(!dir.path().join("ios").exists());

        let res = dir.path().join("android/app/src/main/res");
        for (density, size) in [("mdpi", 48), ("xxxhdpi", 192)] {
            for name in ["ic_launcher.png", "ic_launcher_round.png", "ic_launcher_foreground.png"] {
                let img = image::open(res.join(format!("mipmap-{density}")).join(name)).unwrap();
                assert_eq!((img.width(), img.height()), (size, size), "{density}/{name}");
            }
        }
        let splash = image::open(res.join("drawable-land-xxxhdpi/splash.png")).unwrap();
        assert_eq!((splash.width(), splash.height()), (1920, 1280));
        let splash = image::open(res.join("drawable-hdpi/splash.png")).unwrap();
        assert_eq!((splash.width(), splash.height()), (480, 800));

        let public = dir.path().join("public");
        let og = image::open(public.join("app-icons/og-image.png")).unwrap();
        assert_eq!((og.width(), og.height()), (1200, 630));
        let touch = image::open(public.join("apple-touch-icon.png")).unwrap();
        assert_eq!((touch.width(), touch.height()), (180, 180));
        let favicon = image::open(public.join("favicon.ico")).unwrap();
        assert_eq!((favicon.width(), favicon.height()), (32, 32));
        for n in AssetPlan::default().web_icon_sizes {
            let icon = image::open(public.join(format!("app-icons/icon-{n}x{n}.png"))).unwrap();
            assert_eq!((icon.width(), icon.height()), (n, n));
        }

        let text = summary.to_string();
        assert!(text.contains("38 files"));
        assert!(text.contains("iOS icons: skipped"));
    }

    #[test]
    fn ios_icons_and_manifest() {
        let dir = project();
        fs::create_dir_all(dir.path().join("ios/App/App/Assets.xcassets")).unwrap();

        let summary = generate(dir.path()).unwrap();
        let ios = summary.step(Step::Ios).unwrap();
        assert_eq!(ios.written.len(), 16);
        assert!(!summary.was_skipped(Step::Ios));

        let set = dir.path().join("ios/App/App/Assets.xcassets/AppIcon.appiconset");
        let icon = image::open(set.join("icon-83.5@2x.png")).unwrap();
        assert_eq!((icon.width(), icon.height()), (167, 167));
        let icon = image::open(set.join("icon-1024@1x.png")).unwrap();
        assert_eq!((icon.width(), icon.height()), (1024, 1024));

        let manifest =
            IconManifest::from_json(&fs::read_to_string(set.join("Contents.json")).unwrap())
                .unwrap();
        assert_eq!(manifest.len(), 15);
        for entry in &manifest.images {
            assert!(set.join(&entry.filename).is_file(), "{}", entry.filename);
        }
        assert_eq!(manifest.images[13].size, "83.5x83.5");
        assert_eq!(manifest.info.author, "xcode");
    }

    #[test]
    fn batch_is_idempotent() {
        let dir = project();
        fs::create_dir_all(dir.path().join("ios/App/App/Assets.xcassets")).unwrap();

        let first = generate(dir.path()).unwrap();
        let before = snapshot(dir.path(), &first);
        let second = generate(dir.path()).unwrap();
        let after = snapshot(dir.path(), &second);

        assert_eq!(before.len(), 54);
        assert_eq!(before, after);
    }

    #[test]
    fn unusable_brand_font_counts_fallbacks() {
        let dir = TempDir::new().unwrap();
        let summary = small_generator(dir.path(), b"garbage".to_vec()).run().unwrap();
        // 3 android icons, 1 splash, 1 web icon + favicon + touch + og.
        assert_eq!(summary.files_written(), 8);
        assert_eq!(summary.fallback_renders(), 8);
        assert!(summary.to_string().contains("8 images were drawn with the fallback font"));
    }

    #[test]
    fn round_icon_keeps_wordmark() {
        let dir = TempDir::new().unwrap();
        small_generator(dir.path(), FALLBACK_FONT.to_vec())
            .run()
            .unwrap();

        let mdpi = dir.path().join("android/app/src/main/res/mipmap-mdpi");
        let square = image::open(mdpi.join("ic_launcher.png")).unwrap().to_rgba8();
        let round = image::open(mdpi.join("ic_launcher_round.png")).unwrap().to_rgba8();
        let foreground = image::open(mdpi.join("ic_launcher_foreground.png"))
            .unwrap()
            .to_rgba8();
        assert_eq!(square, foreground);

        let solid = [255, 89, 115, 255];
        let text_pixels: Vec<_> = square
            .enumerate_pixels()
            .filter(|(_, _, p)| p.0 == solid)
            .map(|(x, y, _)| (x, y))
            .collect();
        assert!(!text_pixels.is_empty());
        for (x, y) in text_pixels {
            assert_eq!(round.get_pixel(x, y).0, solid, "({x}, {y})");
        }
        assert_eq!(round.get_pixel(0, 0).0[3], 0);
    }

    #[test]
    fn write_failure_aborts_batch() {
        let dir = TempDir::new().unwrap();
        // A file where the Android res directory should be.
        fs::create_dir_all(dir.path().join("android/app/src/main")).unwrap();
        fs::write(dir.path().join("android/app/src/main/res"), b"not a dir").unwrap();

        let err = small_generator(dir.path(), FALLBACK_FONT.to_vec())
            .run()
            .unwrap_err();
        assert!(matches!(err, Error::CreateDir { .. }), "got {err:?}");
        assert!(!dir.path().join("public").exists(), "later steps never ran");
    }

    #[test]
    fn duplicate_paths_abort_step() {
        let dir = TempDir::new().unwrap();
        let mut generator = small_generator(dir.path(), FALLBACK_FONT.to_vec());
        generator.plan.web_icon_sizes = vec![16, 16];
        let err = generator.run().unwrap_err();
        assert!(matches!(err, Error::DuplicateOutput { .. }));
    }

    #[test]
    fn short_names() {
        assert_eq!(
            short_name(Path::new("/p/res/mipmap-hdpi/ic_launcher.png")),
            "mipmap-hdpi/ic_launcher.png"
        );
        assert_eq!(short_name(Path::new("favicon.ico")), "favicon.ico");
    }
}
