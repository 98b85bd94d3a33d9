use binwheel_lib::platform::PlatformIdentifier;
use binwheel_lib::platform::arch::Arch;
use binwheel_lib::platform::os::Os;

use crate::output::{print_info, print_stat};

pub fn cmd_info() {
  print_info(&format!("binwheel v{}", env!("CARGO_PKG_VERSION")));
  match (Os::current(), Arch::current(), PlatformIdentifier::current()) {
    (Some(os), Some(arch), Some(platform)) => {
      print_stat("OS", os.as_str());
      print_stat("Arch", arch.as_str());
      print_stat("Wheel tag", &platform.tag());
    }
    _ => println!("Could not detect platform."),
  }
}
