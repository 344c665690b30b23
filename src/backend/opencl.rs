use opencl3::command_queue::{CommandQueue, CL_QUEUE_PROFILING_ENABLE};
use opencl3::context::Context;
use opencl3::device::{Device, CL_DEVICE_TYPE_ACCELERATOR};
use opencl3::event::Event;
use opencl3::kernel::Kernel;
use opencl3::memory::{Buffer, ClMem, CL_MEM_READ_ONLY, CL_MEM_WRITE_ONLY};
use opencl3::platform::get_platforms;
use opencl3::program::Program;
use opencl3::types::{cl_int, CL_BLOCKING};
use std::path::*;
use std::ptr;

use super::select::{select_device, PlatformInfo};
use super::Backend;
use crate::config::LaunchConfig;
use crate::error::*;
use crate::image::KernelImage;
use crate::workload::Workload;

/// Accelerator reached through an OpenCL platform
///
/// Handles are released on drop, so every early return tears down the
/// context and queue.
pub struct OpenClBackend {
    kernel: Kernel,
    _program: Program,
    queue: CommandQueue,
    context: Context,
    device_name: String,
}

impl OpenClBackend {
    /// Resolve the device, create context and queue, then build the kernel
    /// from the image at `image`
    pub fn open<P: AsRef<Path>>(cfg: &LaunchConfig, image: P) -> Result<Self> {
        let device = resolve_device(cfg)?;
        let device_name = device.name().log(Step::Device, &cfg.platform_marker)?;
        info!("Using device {}", device_name);

        let context = Context::from_device(&device).log(Step::Context, &device_name)?;
        let queue = CommandQueue::create_default(&context, CL_QUEUE_PROFILING_ENABLE)
            .log(Step::Queue, &device_name)?;

        let image = KernelImage::load(image)?;
        let program = Program::create_and_build_from_binary(&context, &[image.bytes()], "")
            .map_err(failure::err_msg)
            .log(
                Step::Build,
                &format!("program from binary {}", image.path().display()),
            )?;
        let kernel = Kernel::create(&program, &cfg.kernel_name)
            .log(Step::Lookup, &format!("kernel '{}'", cfg.kernel_name))?;

        Ok(OpenClBackend {
            kernel,
            _program: program,
            queue,
            context,
            device_name,
        })
    }

    fn input_buffer(&self, data: &[i32], name: &str) -> Result<Buffer<cl_int>> {
        let mut buffer = unsafe {
            Buffer::<cl_int>::create(&self.context, CL_MEM_READ_ONLY, data.len(), ptr::null_mut())
        }
        .log(Step::Allocate, name)?;
        unsafe {
            self.queue
                .enqueue_write_buffer(&mut buffer, CL_BLOCKING, 0, data, &[])
        }
        .log(Step::Transfer, &format!("{} to device", name))?;
        Ok(buffer)
    }
}

impl Backend for OpenClBackend {
    fn describe(&self) -> String {
        self.device_name.clone()
    }

    fn execute(&mut self, workload: &mut Workload) -> Result<Option<f64>> {
        let n = workload.len();
        let buf_a = self.input_buffer(&workload.a, "bufA")?;
        let buf_b = self.input_buffer(&workload.b, "bufB")?;
        let buf_c = unsafe {
            Buffer::<cl_int>::create(&self.context, CL_MEM_WRITE_ONLY, n, ptr::null_mut())
        }
        .log(Step::Allocate, "bufC")?;

        let size: cl_int = workload.size_arg();
        unsafe {
            self.kernel.set_arg(0, &buf_a.get()).log(Step::Bind, "setArg A")?;
            self.kernel.set_arg(1, &buf_b.get()).log(Step::Bind, "setArg B")?;
            self.kernel.set_arg(2, &buf_c.get()).log(Step::Bind, "setArg C")?;
            self.kernel.set_arg(3, &size).log(Step::Bind, "setArg size")?;
        }

        let event = unsafe { self.queue.enqueue_task(self.kernel.get(), &[]) }
            .log(Step::Execute, "enqueueTask")?;
        self.queue.finish().log(Step::Execute, "finish")?;

        unsafe {
            self.queue
                .enqueue_read_buffer(&buf_c, CL_BLOCKING, 0, &mut workload.c, &[])
        }
        .log(Step::Transfer, "bufC to host")?;

        Ok(kernel_time_ms(&event))
    }
}

fn kernel_time_ms(event: &Event) -> Option<f64> {
    let start = event.profiling_command_start().ok()?;
    let end = event.profiling_command_end().ok()?;
    Some(end.saturating_sub(start) as f64 * 1e-6)
}

fn resolve_device(cfg: &LaunchConfig) -> Result<Device> {
    let platforms = get_platforms().log(Step::Device, &cfg.platform_marker)?;
    let mut infos = Vec::with_capacity(platforms.len());
    let mut devices = Vec::with_capacity(platforms.len());
    for platform in &platforms {
        let name = platform.name().unwrap_or_default();
        // CL_DEVICE_NOT_FOUND when the platform has no accelerator
        let ids = platform
            .get_devices(CL_DEVICE_TYPE_ACCELERATOR)
            .unwrap_or_default();
        let found: Vec<Device> = ids.into_iter().map(Device::new).collect();
        let names: Vec<String> = found.iter().map(|d| d.name().unwrap_or_default()).collect();
        debug!("Platform {:?}: devices {:?}", name, names);
        infos.push(PlatformInfo {
            name,
            devices: names,
        });
        devices.push(found);
    }
    let (p, d) = select_device(&infos, &cfg.platform_marker, &cfg.device_markers)
        .ok_or_else(|| err_msg(Step::Device, &cfg.platform_marker))?;
    Ok(devices.swap_remove(p).swap_remove(d))
}
