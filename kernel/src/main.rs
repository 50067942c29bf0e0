#![no_std]
#![no_main]

mod logger;
mod serial;
mod vga;

use core::panic::PanicInfo;

use bootloader::{entry_point, BootInfo};
use kconsole::{ConsoleConfig, SpinBackoff};
use log::{info, LevelFilter};
use x86_64::instructions::interrupts;

use crate::vga::CONSOLE;

entry_point!(kernel_main);

fn kernel_main(_boot_info: &'static BootInfo) -> ! {
    logger::init(LevelFilter::Debug).expect("Logger installation failed");

    info!("kconsole booting, VGA text mode");
    let config = ConsoleConfig::default();
    let console = vga::init(config).expect("VGA text surface rejected");
    console.lock().start();

    let mut backoff = SpinBackoff::from_config(&config);
    kconsole::run(|| interrupts::without_interrupts(|| console.lock().step()), &mut backoff)
}

pub fn hlt_loop() -> ! {
    loop {
        x86_64::instructions::hlt();
    }
}

/// This function is called on panic.
#[panic_handler]
fn panic(info: &PanicInfo) -> ! {
    serial_println!("{}", info);
    // The polling loop may hold the console; never wait for it here.
    if let Some(mut console) = CONSOLE.get().and_then(|console| console.try_lock()) {
        use core::fmt::Write;
        let _ = write!(console.writer_mut(), "\n{}", info);
    }
    hlt_loop();
}
