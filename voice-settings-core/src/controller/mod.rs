mod permission_device;
mod selection;

pub use permission_device::PermissionDeviceController;
