// ============================================================================
// MOCK DECODER - Doble de pruebas para los tests del controller. Captura los
// callbacks registrados y permite dispararlos a mano desde el test.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::traits::{DecoderCallbacks, DecoderControls, DecoderHandle, DecoderRequest, QrDecoder};

#[derive(Clone, Default)]
pub struct MockDecoder {
    pub starts: Rc<Cell<usize>>,
    pub stops: Rc<Cell<usize>>,
    /// Si está presente, `start()` falla con este mensaje
    pub fail_start: Rc<RefCell<Option<String>>>,
    /// Si es true, el stop del handle devuelve error
    pub fail_stop: Rc<Cell<bool>>,
    callbacks: Rc<RefCell<Option<DecoderCallbacks>>>,
    last_request: Rc<RefCell<Option<DecoderRequest>>>,
}

struct MockControls {
    stops: Rc<Cell<usize>>,
    fail_stop: Rc<Cell<bool>>,
}

impl DecoderControls for MockControls {
    fn stop(&self) -> Result<(), String> {
        self.stops.set(self.stops.get() + 1);
        if self.fail_stop.get() {
            Err("mock stop failure".to_string())
        } else {
            Ok(())
        }
    }
}

impl MockDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_start(message: &str) -> Self {
        let mock = Self::default();
        *mock.fail_start.borrow_mut() = Some(message.to_string());
        mock
    }

    pub fn last_request(&self) -> Option<DecoderRequest> {
        self.last_request.borrow().clone()
    }

    /// Simula que la librería terminó de adjuntarse al stream de cámara
    pub fn fire_attached(&self) {
        if let Some(cbs) = &*self.callbacks.borrow() {
            (cbs.on_attached)();
        }
    }

    /// Simula un frame con QR reconocido
    pub fn fire_decode(&self, text: &str) {
        if let Some(cbs) = &*self.callbacks.borrow() {
            (cbs.on_decode)(text.to_string());
        }
    }

    /// Simula un error fatal reportado por la librería
    pub fn fire_error(&self, message: &str) {
        if let Some(cbs) = &*self.callbacks.borrow() {
            (cbs.on_error)(message.to_string());
        }
    }
}

impl QrDecoder for MockDecoder {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn start(
        &self,
        request: &DecoderRequest,
        callbacks: DecoderCallbacks,
    ) -> Result<DecoderHandle, String> {
        self.starts.set(self.starts.get() + 1);
        *self.last_request.borrow_mut() = Some(request.clone());
        if let Some(message) = &*self.fail_start.borrow() {
            return Err(message.clone());
        }
        *self.callbacks.borrow_mut() = Some(callbacks);
        Ok(DecoderHandle::new(
            "mock",
            Box::new(MockControls {
                stops: self.stops.clone(),
                fail_stop: self.fail_stop.clone(),
            }),
        ))
    }
}
