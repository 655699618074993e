/// Espera antes de arrancar el decoder tras montar el componente.
/// El <video> tiene que existir en el DOM cuando la librería JS lo busca.
pub const DOM_READY_DELAY_MS: u32 = 100;
