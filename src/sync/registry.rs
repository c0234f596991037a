//! Port-to-driver binding for interrupt vectors.
//!
//! A UART vector is a bare `extern "C" fn()` with no context argument, so the
//! driver it should service has to be found through global state. The
//! [`REGISTRY`] holds one slot per [`PortId`]; the vector generated by
//! [`serial_interrupt_trampoline!`](crate::serial_interrupt_trampoline) looks
//! its port up and forwards to the bound driver.
//!
//! Slots are read and written inside a critical section. The bound driver is
//! called after the critical section ends, so its handler runs with other
//! interrupts enabled.

use super::primitives::CriticalSectionCell;
use crate::driver::config::{PortId, SerialConfig};
use crate::driver::error::{ConfigError, ConfigResult, Result};
use crate::driver::interrupt::InterruptStatus;
use crate::driver::serial::DmaSerial;
use crate::hal::SerialDma;
use crate::internal::constants::MAX_PORTS;

/// Something an interrupt vector can forward to.
pub trait InterruptTarget: Sync {
    /// Service the pending interrupt conditions.
    fn service(&self) -> InterruptStatus;
}

impl<H: SerialDma + Sync> InterruptTarget for DmaSerial<'_, H> {
    #[inline]
    fn service(&self) -> InterruptStatus {
        self.on_interrupt()
    }
}

type Slot = Option<&'static dyn InterruptTarget>;

/// Table of drivers bound to interrupt vectors, indexed by port.
pub struct InterruptRegistry {
    slots: CriticalSectionCell<[Slot; MAX_PORTS]>,
}

impl InterruptRegistry {
    /// Create an empty registry (const, suitable for static initialization).
    pub const fn new() -> Self {
        Self {
            slots: CriticalSectionCell::new([None; MAX_PORTS]),
        }
    }

    /// Bind `target` to `port`.
    ///
    /// Binding the same instance again is allowed.
    ///
    /// # Errors
    ///
    /// [`ConfigError::PortInUse`] if a different instance is already bound.
    pub fn register(&self, port: PortId, target: &'static dyn InterruptTarget) -> ConfigResult<()> {
        self.slots.with(|slots| {
            let slot = &mut slots[port.index()];
            if let Some(existing) = *slot {
                let existing: *const dyn InterruptTarget = existing;
                let target: *const dyn InterruptTarget = target;
                if !core::ptr::addr_eq(existing, target) {
                    return Err(ConfigError::PortInUse);
                }
            }
            *slot = Some(target);
            Ok(())
        })
    }

    /// Whether a driver is bound to `port`
    pub fn is_bound(&self, port: PortId) -> bool {
        self.slots.with(|slots| slots[port.index()].is_some())
    }

    /// Forward an interrupt on `port` to its driver.
    ///
    /// Returns `None` when nothing is bound; the interrupt is then ignored.
    pub fn dispatch(&self, port: PortId) -> Option<InterruptStatus> {
        let target = self.slots.with(|slots| slots[port.index()])?;
        Some(target.service())
    }
}

impl Default for InterruptRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Process-wide registry consulted by the interrupt vectors.
pub static REGISTRY: InterruptRegistry = InterruptRegistry::new();

/// Initialize `serial` on `port` and bind it to the port's interrupt vector.
///
/// The binding is made first so a conflicting port is reported before any
/// hardware is touched. The interrupt line stays masked until
/// [`DmaSerial::init`] has armed the receive DMA.
///
/// # Errors
/// - `PortInUse` - another driver is bound to `port`
/// - `InvalidBaudRate` - see [`DmaSerial::init`]
///
/// # Example
///
/// ```ignore
/// static SERIAL: StaticCell<DmaSerial<'static, PdcUart>> = StaticCell::new();
///
/// let serial = SERIAL.init(DmaSerial::new(hal, rx, tx)?);
/// sync::initialize(PortId::Uart0, serial, &SerialConfig::default())?;
///
/// serial_interrupt_trampoline!(UART0_Handler, PortId::Uart0);
/// ```
pub fn initialize<H: SerialDma + Sync + 'static>(
    port: PortId,
    serial: &'static DmaSerial<'static, H>,
    config: &SerialConfig,
) -> Result<()> {
    REGISTRY.register(port, serial)?;
    #[cfg(feature = "defmt")]
    defmt::info!("{} bound to interrupt vector", port);
    serial.init(config)
}

#[cfg(test)]
mod tests {
    extern crate std;
    use core::sync::atomic::{AtomicUsize, Ordering};
    use std::boxed::Box;

    use super::*;
    use crate::driver::error::Error;
    use crate::testing::{HalEvent, MockSerialDma};

    struct Counter(AtomicUsize);

    impl InterruptTarget for Counter {
        fn service(&self) -> InterruptStatus {
            self.0.fetch_add(1, Ordering::SeqCst);
            InterruptStatus::default()
        }
    }

    fn counter() -> &'static Counter {
        Box::leak(Box::new(Counter(AtomicUsize::new(0))))
    }

    fn leaked_serial(
        rx_len: usize,
        tx_len: usize,
    ) -> (&'static MockSerialDma, &'static DmaSerial<'static, &'static MockSerialDma>) {
        let mock: &'static MockSerialDma = Box::leak(Box::new(MockSerialDma::new()));
        let rx: &'static mut [u8] = Box::leak(std::vec![0u8; rx_len].into_boxed_slice());
        let tx: &'static mut [u8] = Box::leak(std::vec![0u8; tx_len].into_boxed_slice());
        let serial = DmaSerial::new(mock, rx, tx).unwrap();
        (mock, Box::leak(Box::new(serial)))
    }

    #[test]
    fn dispatch_on_empty_slot_is_ignored() {
        let registry = InterruptRegistry::new();
        assert!(!registry.is_bound(PortId::Uart0));
        assert_eq!(registry.dispatch(PortId::Uart0), None);
    }

    #[test]
    fn dispatch_reaches_only_the_bound_port() {
        let registry = InterruptRegistry::new();
        let uart0 = counter();
        let uart1 = counter();
        registry.register(PortId::Uart0, uart0).unwrap();
        registry.register(PortId::Uart1, uart1).unwrap();

        registry.dispatch(PortId::Uart0);
        registry.dispatch(PortId::Uart0);
        registry.dispatch(PortId::Uart1);

        assert_eq!(uart0.0.load(Ordering::SeqCst), 2);
        assert_eq!(uart1.0.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn second_driver_on_same_port_is_refused() {
        let registry = InterruptRegistry::new();
        let first = counter();
        let second = counter();
        registry.register(PortId::Uart1, first).unwrap();

        assert_eq!(
            registry.register(PortId::Uart1, second),
            Err(ConfigError::PortInUse)
        );
        // Same instance may bind again.
        assert_eq!(registry.register(PortId::Uart1, first), Ok(()));

        registry.dispatch(PortId::Uart1);
        assert_eq!(first.0.load(Ordering::SeqCst), 1);
        assert_eq!(second.0.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn registered_serial_services_its_rings() {
        let registry = InterruptRegistry::new();
        let (mock, serial) = leaked_serial(4, 8);
        serial.init(&SerialConfig::default()).unwrap();
        registry.register(PortId::Uart0, serial).unwrap();

        serial.enqueue_and_send(b"hi").unwrap();
        mock.complete_transmit();
        let status = registry.dispatch(PortId::Uart0).unwrap();

        assert!(status.tx_buffer_empty);
        assert!(!serial.is_transmitting());
        assert_eq!(mock.wire(), b"hi");
    }

    #[test]
    fn initialize_binds_global_registry_and_trampoline_dispatches() {
        let (mock, serial) = leaked_serial(4, 4);
        initialize(PortId::Uart0, serial, &SerialConfig::default()).unwrap();
        assert!(REGISTRY.is_bound(PortId::Uart0));
        assert!(mock.events().contains(&HalEvent::UnmaskLine));

        crate::serial_interrupt_trampoline!(TEST_UART0_VECTOR, PortId::Uart0);

        serial.enqueue_and_send(b"ok").unwrap();
        mock.complete_transmit();
        TEST_UART0_VECTOR();
        assert!(!serial.is_transmitting());
        assert_eq!(mock.wire(), b"ok");

        // A second driver cannot steal the port, and nothing is touched.
        let (other_mock, other) = leaked_serial(4, 4);
        assert_eq!(
            initialize(PortId::Uart0, other, &SerialConfig::default()),
            Err(Error::Config(ConfigError::PortInUse))
        );
        assert!(other_mock.events().is_empty());

        // Re-initializing the bound driver is fine.
        initialize(PortId::Uart0, serial, &SerialConfig::default()).unwrap();
    }
}
