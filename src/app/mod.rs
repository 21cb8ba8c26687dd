pub mod dispatch;
pub mod forms;

pub use dispatch::{App, dispatch};
pub use forms::{LoginForm, REGISTER_REDIRECT_DELAY, RegisterForm};
