//! Diálogo de leitura de código de barras da OS.
//!
//! O widget de câmera fica atrás do trait [`ScanWidget`]; o diálogo só cuida
//! do ciclo de vida (montar, pausar, retomar, liberar) e da validação do
//! código lido.

use std::time::Duration;

use thiserror::Error;

/// Espera antes de montar o widget, para o alvo já existir.
pub const MOUNT_DELAY: Duration = Duration::from_millis(100);
pub const READER_TARGET: &str = "reader";
pub const SERVICE_ORDER_CODE_LEN: usize = 10;
pub const INVALID_CODE_NOTICE: &str = "Código inválido. O número da OS deve ter 10 dígitos.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanConfig {
    pub fps: u32,
    /// Caixa de detecção (largura, altura) em pixels
    pub qrbox: (u32, u32),
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            fps: 10,
            qrbox: (250, 250),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScanWidgetError {
    #[error("o widget já foi liberado")]
    AlreadyReleased,

    #[error("falha no widget de leitura: {0}")]
    Widget(String),
}

pub trait ScanWidget: Send {
    fn start(&mut self, target: &str, config: &ScanConfig) -> Result<(), ScanWidgetError>;
    fn pause(&mut self) -> Result<(), ScanWidgetError>;
    fn resume(&mut self) -> Result<(), ScanWidgetError>;
    /// Libera câmera e recursos.
    fn clear(&mut self) -> Result<(), ScanWidgetError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanEvent {
    Decoded(String),
    /// Erro não fatal (nenhum código no quadro, leitura parcial)
    Failure(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScannerState {
    Closed,
    Scanning,
    Rejected { code: String },
    Completed,
}

pub fn is_valid_service_order_code(text: &str) -> bool {
    text.len() == SERVICE_ORDER_CODE_LEN && text.bytes().all(|b| b.is_ascii_digit())
}

pub struct ScannerDialog<W, F>
where
    W: ScanWidget,
    F: FnMut(String),
{
    widget: W,
    on_scan: F,
    state: ScannerState,
    mounted: bool,
}

impl<W, F> ScannerDialog<W, F>
where
    W: ScanWidget,
    F: FnMut(String),
{
    pub fn new(widget: W, on_scan: F) -> Self {
        Self {
            widget,
            on_scan,
            state: ScannerState::Closed,
            mounted: false,
        }
    }

    pub fn state(&self) -> &ScannerState {
        &self.state
    }

    pub fn notice(&self) -> Option<&'static str> {
        match self.state {
            ScannerState::Rejected { .. } => Some(INVALID_CODE_NOTICE),
            _ => None,
        }
    }

    /// Monta o leitor. Só age a partir de `Closed`: cada abertura é uma
    /// nova sessão de leitura.
    pub async fn open(&mut self) -> Result<(), ScanWidgetError> {
        if self.state != ScannerState::Closed {
            return Ok(());
        }
        tokio::time::sleep(MOUNT_DELAY).await;
        self.widget.start(READER_TARGET, &ScanConfig::default())?;
        self.mounted = true;
        self.state = ScannerState::Scanning;
        Ok(())
    }

    pub fn handle(&mut self, event: ScanEvent) -> Result<(), ScanWidgetError> {
        if self.state != ScannerState::Scanning {
            return Ok(());
        }
        match event {
            ScanEvent::Failure(reason) => {
                tracing::trace!("Leitura sem código: {}", reason);
            }
            ScanEvent::Decoded(code) if is_valid_service_order_code(&code) => {
                // Completed ignora novos eventos: um callback por sessão
                self.teardown();
                self.state = ScannerState::Completed;
                (self.on_scan)(code);
            }
            ScanEvent::Decoded(code) => {
                self.widget.pause()?;
                self.state = ScannerState::Rejected { code };
            }
        }
        Ok(())
    }

    /// "Ler novamente" depois de um código rejeitado.
    pub fn scan_again(&mut self) -> Result<(), ScanWidgetError> {
        if let ScannerState::Rejected { .. } = self.state {
            self.widget.resume()?;
            self.state = ScannerState::Scanning;
        }
        Ok(())
    }

    pub fn close(&mut self) {
        self.teardown();
        self.state = ScannerState::Closed;
    }

    fn teardown(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        match self.widget.clear() {
            Ok(()) | Err(ScanWidgetError::AlreadyReleased) => {}
            Err(e) => tracing::warn!("Falha ao liberar o leitor: {}", e),
        }
    }
}

impl<W, F> Drop for ScannerDialog<W, F>
where
    W: ScanWidget,
    F: FnMut(String),
{
    fn drop(&mut self) {
        self.teardown();
    }
}
