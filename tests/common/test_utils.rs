use tempfile::TempDir;

/// Fresh, empty directory for one test's output files, removed on drop.
pub fn scratch_dir(test_name: &str) -> TempDir {
    tempfile::Builder::new()
        .prefix(&format!("flow_mesh_{test_name}_"))
        .tempdir()
        .expect("Failed to create scratch dir")
}

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Device and queue of any available adapter, `None` on machines without one.
#[cfg(feature = "integration-tests")]
pub async fn headless_device() -> Option<(wgpu::Device, wgpu::Queue)> {
    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: wgpu::Backends::PRIMARY,
        ..Default::default()
    });
    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: None,
            force_fallback_adapter: false,
        })
        .await
        .ok()?;
    adapter
        .request_device(&wgpu::DeviceDescriptor {
            label: None,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            memory_hints: Default::default(),
            trace: wgpu::Trace::Off,
            ..Default::default()
        })
        .await
        .ok()
}
