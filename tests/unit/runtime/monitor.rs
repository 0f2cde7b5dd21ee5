use super::*;

fn feed(m: &mut PerformanceMonitor, fps: f64, frames: usize) -> Vec<QualityChange> {
    (0..frames)
        .filter_map(|_| m.record_frame(1000.0 / fps))
        .collect()
}

#[test]
fn fresh_monitor_reports_nothing() {
    let m = PerformanceMonitor::new();
    assert_eq!(m.current_fps(), 0.0);
    assert_eq!(m.average_fps(), 0.0);
    assert_eq!(m.quality_level(), 1.0);
}

#[test]
fn current_and_average_fps() {
    let mut m = PerformanceMonitor::new();
    m.record_frame(10.0);
    m.record_frame(20.0);
    assert!((m.current_fps() - 50.0).abs() < 1e-9);
    assert!((m.average_fps() - 75.0).abs() < 1e-9);
}

#[test]
fn buffer_keeps_only_the_last_window() {
    let mut m = PerformanceMonitor::new();
    feed(&mut m, 10.0, 10);
    feed(&mut m, 100.0, FPS_WINDOW);
    assert_eq!(m.sample_count(), FPS_WINDOW);
    assert!((m.average_fps() - 100.0).abs() < 1e-6);
}

#[test]
fn healthy_frame_rate_keeps_full_quality() {
    let mut m = PerformanceMonitor::new();
    assert!(feed(&mut m, 60.0, 500).is_empty());
    assert_eq!(m.quality_level(), 1.0);
}

#[test]
fn sustained_low_fps_degrades_once() {
    let mut m = PerformanceMonitor::new();
    assert!(feed(&mut m, 40.0, 59).is_empty());
    let changes = feed(&mut m, 40.0, 1);
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].from, 1.0);
    assert_eq!(changes[0].to, 0.7);

    assert!(feed(&mut m, 40.0, 300).is_empty());
    assert_eq!(m.quality_level(), 0.7);
}

#[test]
fn brief_dip_does_not_degrade() {
    let mut m = PerformanceMonitor::new();
    feed(&mut m, 60.0, 60);
    // One slow frame barely moves the 60-sample average.
    feed(&mut m, 20.0, 1);
    feed(&mut m, 60.0, 200);
    assert_eq!(m.quality_level(), 1.0);
}

#[test]
fn sustained_critical_fps_steps_down_to_half() {
    let mut m = PerformanceMonitor::new();
    let changes = feed(&mut m, 20.0, 120);
    let levels: Vec<f64> = changes.iter().map(|c| c.to).collect();
    assert_eq!(levels, vec![0.7, 0.5]);
    assert_eq!(m.quality_level(), 0.5);
}

#[test]
fn quality_never_recovers_automatically() {
    // Current behavior: degradation is one-way within a monitored session.
    // Recovery needs an explicit recalibrate().
    let mut m = PerformanceMonitor::new();
    feed(&mut m, 40.0, 60);
    assert_eq!(m.quality_level(), 0.7);

    assert!(feed(&mut m, 60.0, 600).is_empty());
    assert!(m.average_fps() > 45.0);
    assert_eq!(m.quality_level(), 0.7);
}

#[test]
fn recalibrate_restores_full_quality() {
    let mut m = PerformanceMonitor::new();
    feed(&mut m, 40.0, 60);
    let change = m.recalibrate().unwrap();
    assert_eq!(change.from, 0.7);
    assert_eq!(change.to, 1.0);
    assert_eq!(m.quality_level(), 1.0);
    assert_eq!(m.sample_count(), 0);
    assert!(m.recalibrate().is_none());
}

#[test]
fn non_positive_deltas_are_ignored() {
    let mut m = PerformanceMonitor::new();
    assert!(m.record_frame(0.0).is_none());
    assert!(m.record_frame(-5.0).is_none());
    assert_eq!(m.sample_count(), 0);
}

#[test]
fn device_classes_and_count_scaling() {
    assert_eq!(DeviceClass::from_canvas(Canvas::new(375, 667)), DeviceClass::Mobile);
    assert_eq!(DeviceClass::from_canvas(Canvas::new(800, 600)), DeviceClass::Tablet);
    assert_eq!(DeviceClass::from_canvas(Canvas::new(1920, 1080)), DeviceClass::Desktop);
    assert_eq!(scale_particle_count(100, 0.75, 0.7), 52);
    assert_eq!(scale_particle_count(100, 1.0, 1.0), 100);
    assert_eq!(scale_particle_count(3, 0.5, 0.5), 0);
}
