pub mod guard;

pub use guard::{
    DEFAULT_VIEW, LOGIN_VIEW, NavLink, Navigation, Requirement, View, evaluate, evaluate_path,
    nav_links,
};
