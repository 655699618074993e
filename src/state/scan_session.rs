// ============================================================================
// SCAN SESSION - Máquina de estados del ciclo de vida de escaneo.
//
// Fases: Idle → Requesting → Scanning → Decoded → (reset) → Idle
//
// Reglas que este objeto hace cumplir:
//   - A lo más una sesión activa: begin_request() rechaza si ya hay una.
//   - Época por arranque: los callbacks del decoder y las continuaciones
//     async capturan la época vigente y se vuelven no-ops si quedó vieja
//     (stop() y cada arranque nuevo la invalidan).
//   - Primera decodificación gana: tras el primer resultado la fase pasa a
//     Decoded y los callbacks tardíos del mismo arranque no hacen nada.
//   - stop() es idempotente y los errores al detener se loguean, nunca se
//     muestran al usuario.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::decoder::DecoderHandle;
use crate::models::{CameraDevice, ScanError, ScanPhase};

/// Vista inmutable del estado, para renderizar
#[derive(Clone, Debug, PartialEq)]
pub struct ScanSnapshot {
    pub phase: ScanPhase,
    pub selected_device: Option<CameraDevice>,
    pub last_result: Option<String>,
    /// Mensaje listo para mostrar al usuario (None si no hay error visible)
    pub user_error: Option<String>,
}

#[derive(Clone)]
pub struct ScanSession {
    phase: Rc<Cell<ScanPhase>>,
    epoch: Rc<Cell<u64>>,
    selected_device: Rc<RefCell<Option<CameraDevice>>>,
    last_result: Rc<RefCell<Option<String>>>,
    last_error: Rc<RefCell<Option<ScanError>>>,
    handle: Rc<RefCell<Option<DecoderHandle>>>,
    subscribers: Rc<RefCell<Vec<Rc<dyn Fn()>>>>,
}

impl ScanSession {
    pub fn new() -> Self {
        Self {
            phase: Rc::new(Cell::new(ScanPhase::Idle)),
            epoch: Rc::new(Cell::new(0)),
            selected_device: Rc::new(RefCell::new(None)),
            last_result: Rc::new(RefCell::new(None)),
            last_error: Rc::new(RefCell::new(None)),
            handle: Rc::new(RefCell::new(None)),
            subscribers: Rc::new(RefCell::new(Vec::new())),
        }
    }

    // ========================================================================
    // Lecturas
    // ========================================================================

    pub fn phase(&self) -> ScanPhase {
        self.phase.get()
    }

    /// ¿Sigue vigente la época capturada por un callback o continuación?
    pub fn is_current(&self, epoch: u64) -> bool {
        self.epoch.get() == epoch
    }

    pub fn snapshot(&self) -> ScanSnapshot {
        ScanSnapshot {
            phase: self.phase.get(),
            selected_device: self.selected_device.borrow().clone(),
            last_result: self.last_result.borrow().clone(),
            user_error: self
                .last_error
                .borrow()
                .as_ref()
                .and_then(|e| e.user_message()),
        }
    }

    // ========================================================================
    // Transiciones
    // ========================================================================

    /// Abrir un arranque nuevo. Devuelve la época del arranque, o None si ya
    /// hay una sesión activa (el caller debe tratarlo como no-op).
    pub fn begin_request(&self) -> Option<u64> {
        if !self.phase.get().can_start() {
            log::warn!(
                "⚠️ [SESSION] start ignorado: ya hay una sesión en fase {:?}",
                self.phase.get()
            );
            return None;
        }

        let epoch = self.epoch.get() + 1;
        self.epoch.set(epoch);
        *self.last_result.borrow_mut() = None;
        *self.last_error.borrow_mut() = None;
        self.phase.set(ScanPhase::Requesting);
        log::info!("📷 [SESSION] Arranque #{} → Requesting", epoch);
        self.notify_subscribers();
        Some(epoch)
    }

    /// Registrar el dispositivo elegido para este arranque
    pub fn select_device(&self, epoch: u64, device: CameraDevice) -> bool {
        if !self.is_current(epoch) || !self.phase.get().is_active() {
            return false;
        }
        log::info!("📷 [SESSION] Dispositivo seleccionado: {}", device.label);
        *self.selected_device.borrow_mut() = Some(device);
        self.notify_subscribers();
        true
    }

    /// Guardar el handle del decoder arrancado. Si el arranque quedó viejo
    /// (stop o arranque nuevo en medio), el handle se libera aquí mismo y se
    /// devuelve false.
    pub fn store_handle(&self, epoch: u64, mut handle: DecoderHandle) -> bool {
        if !self.is_current(epoch) || !self.phase.get().is_active() {
            log::info!(
                "🛑 [SESSION] Handle de {} llegó tarde (arranque #{}), liberando",
                handle.engine(),
                epoch
            );
            if let Err(e) = handle.release() {
                log::warn!("⚠️ [SESSION] Error liberando handle tardío: {}", e);
            }
            return false;
        }
        *self.handle.borrow_mut() = Some(handle);
        true
    }

    /// El decoder quedó adjunto al stream: Requesting → Scanning
    pub fn mark_scanning(&self, epoch: u64) -> bool {
        if !self.is_current(epoch) || self.phase.get() != ScanPhase::Requesting {
            return false;
        }
        self.phase.set(ScanPhase::Scanning);
        log::info!("📷 [SESSION] Arranque #{} → Scanning", epoch);
        self.notify_subscribers();
        true
    }

    /// Primer frame decodificado: pasa a Decoded y detiene el decoder.
    /// Acepta también Requesting (hay librerías que decodifican antes de
    /// señalar el attach). Los resultados posteriores devuelven false.
    pub fn complete_decode(&self, epoch: u64, text: String) -> bool {
        if !self.is_current(epoch) || !self.phase.get().is_active() {
            return false;
        }
        self.release_handle("decode");
        log::info!("✅ [SESSION] Arranque #{} decodificó: {}", epoch, text);
        *self.last_result.borrow_mut() = Some(text);
        self.phase.set(ScanPhase::Decoded);
        self.notify_subscribers();
        true
    }

    /// Error fatal del arranque: vuelve a Idle y deja el error registrado
    pub fn fail(&self, epoch: u64, error: ScanError) -> bool {
        if !self.is_current(epoch) || !self.phase.get().is_active() {
            return false;
        }
        self.release_handle("fail");
        log::error!("❌ [SESSION] Arranque #{} falló: {}", epoch, error);
        *self.last_error.borrow_mut() = Some(error);
        self.phase.set(ScanPhase::Idle);
        self.notify_subscribers();
        true
    }

    /// Detener la sesión activa. Idempotente: sin sesión activa no hace nada.
    /// Invalida la época para que las continuaciones en vuelo mueran solas.
    pub fn stop(&self) {
        if !self.phase.get().is_active() {
            log::debug!("🛑 [SESSION] stop sin sesión activa, no-op");
            return;
        }
        self.epoch.set(self.epoch.get() + 1);
        self.release_handle("stop");
        self.phase.set(ScanPhase::Idle);
        log::info!("🛑 [SESSION] Sesión detenida → Idle");
        self.notify_subscribers();
    }

    /// Volver a Idle descartando resultado y error ("escanear otro")
    pub fn reset(&self) {
        self.epoch.set(self.epoch.get() + 1);
        self.release_handle("reset");
        self.phase.set(ScanPhase::Idle);
        *self.selected_device.borrow_mut() = None;
        *self.last_result.borrow_mut() = None;
        *self.last_error.borrow_mut() = None;
        log::info!("🔄 [SESSION] Reset → Idle");
        self.notify_subscribers();
    }

    // ========================================================================
    // Suscripciones (mismo mecanismo que el resto del estado global)
    // ========================================================================

    pub fn subscribe(&self, callback: Rc<dyn Fn()>) {
        self.subscribers.borrow_mut().push(callback);
    }

    fn notify_subscribers(&self) {
        for callback in self.subscribers.borrow().iter() {
            callback();
        }
    }

    /// Sacar el handle vigente (si hay) y detener el decoder subyacente.
    /// Los errores de stop se loguean y nada más.
    fn release_handle(&self, context: &str) {
        let taken = self.handle.borrow_mut().take();
        if let Some(mut handle) = taken {
            if let Err(e) = handle.release() {
                log::warn!("⚠️ [SESSION] Error deteniendo decoder en {}: {}", context, e);
            }
        }
    }
}

impl Default for ScanSession {
    fn default() -> Self {
        Self::new()
    }
}
