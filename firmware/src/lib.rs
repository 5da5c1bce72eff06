// This module is only used as an entry point for unit testing.
#![cfg_attr(not(test), no_std)]

#[cfg(test)]
mod ambient_light;
#[cfg(test)]
mod config;
#[cfg(test)]
mod controller;
#[cfg(test)]
mod errors;
#[cfg(test)]
mod events;
#[cfg(test)]
mod mock;
#[cfg(test)]
mod outputs;
#[cfg(test)]
mod override_switch;
#[cfg(test)]
mod sampler;
#[cfg(test)]
mod states;
