mod basic;
mod orientation;
