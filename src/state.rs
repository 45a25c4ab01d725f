#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    Login,
    Register,
}

impl AuthMode {
    pub fn title(self) -> &'static str {
        match self {
            Self::Login => "Log in",
            Self::Register => "Register",
        }
    }
}

/// Visibility and mode of the login/register modal. Ephemeral, owned solely
/// by the controller; never persisted.
#[derive(Debug, Default)]
pub struct ModalState {
    visible: bool,
    mode: AuthMode,
}

impl ModalState {
    pub fn open(&mut self, mode: AuthMode) {
        self.visible = true;
        self.mode = mode;
    }

    pub fn close(&mut self) {
        self.visible = false;
    }

    pub fn is_open(&self) -> bool {
        self.visible
    }

    pub fn mode(&self) -> AuthMode {
        self.mode
    }
}
