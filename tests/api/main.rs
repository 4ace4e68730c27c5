mod helpers;
mod subscribe;
mod validation;
