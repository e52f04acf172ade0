mod normalization;
mod sign_convention;
mod sweep;
