mod context;
mod webhook;
