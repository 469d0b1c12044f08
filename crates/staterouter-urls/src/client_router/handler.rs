//! Route handler abstractions.
//!
//! This module provides the [`RouteHandler`] trait and implementations for the
//! handler signatures the router accepts. Every handler receives the current
//! [`NavigationState`] as its first argument; they differ in how the captured
//! path parameters are delivered.

use std::marker::PhantomData;
use std::rc::Rc;

use staterouter_history::NavigationState;

use super::error::{HandlerError, RouterError};
use super::params::{FromPath, ParamContext, Path, SingleFromPath};

/// Trait for route handlers.
///
/// This trait abstracts over different handler signatures:
/// - `Fn(&NavigationState, &[String])` - Raw positional parameters
/// - `Fn(&NavigationState, &[String]) -> Result<(), E>` - Fallible
/// - `Fn(&NavigationState, Path<T>)` - With typed parameters
pub trait RouteHandler {
	/// Handles a dispatch for the matched route.
	///
	/// # Errors
	///
	/// Returns [`RouterError::PathExtraction`] if parameter extraction fails
	/// and [`RouterError::Handler`] if the handler itself fails.
	fn handle(&self, state: &NavigationState, params: &ParamContext) -> Result<(), RouterError>;
}

/// Handler receiving the captured values as a slice.
pub(crate) struct PositionalHandler<F> {
	handler: F,
}

impl<F> RouteHandler for PositionalHandler<F>
where
	F: Fn(&NavigationState, &[String]),
{
	fn handle(&self, state: &NavigationState, params: &ParamContext) -> Result<(), RouterError> {
		(self.handler)(state, params.values());
		Ok(())
	}
}

/// Handler receiving the captured values as a slice and reporting failures.
pub(crate) struct FallibleHandler<F, E> {
	handler: F,
	_phantom: PhantomData<E>,
}

impl<F, E> RouteHandler for FallibleHandler<F, E>
where
	F: Fn(&NavigationState, &[String]) -> Result<(), E>,
	E: Into<HandlerError>,
{
	fn handle(&self, state: &NavigationState, params: &ParamContext) -> Result<(), RouterError> {
		(self.handler)(state, params.values()).map_err(|e| RouterError::Handler(e.into()))
	}
}

/// Handler for routes with typed parameters.
///
/// Wraps a `Fn(&NavigationState, Path<T>)` closure.
pub(crate) struct WithParamsHandler<F, T> {
	handler: F,
	_phantom: PhantomData<T>,
}

impl<F, T> RouteHandler for WithParamsHandler<F, T>
where
	F: Fn(&NavigationState, Path<T>),
	T: FromPath,
{
	fn handle(&self, state: &NavigationState, params: &ParamContext) -> Result<(), RouterError> {
		let params = Path::<T>::from_path(params)?;
		(self.handler)(state, params);
		Ok(())
	}
}

/// Handler for routes with a single `Path<T>` argument.
pub(crate) struct SinglePathHandler<F, T> {
	handler: F,
	_phantom: PhantomData<T>,
}

impl<F, T> RouteHandler for SinglePathHandler<F, T>
where
	F: Fn(&NavigationState, Path<T>),
	T: SingleFromPath,
{
	fn handle(&self, state: &NavigationState, params: &ParamContext) -> Result<(), RouterError> {
		let value = T::from_path_at(params, 0)?;
		(self.handler)(state, Path(value));
		Ok(())
	}
}

/// Handler for routes with two `Path<T>` arguments.
pub(crate) struct TwoPathHandler<F, T1, T2> {
	handler: F,
	_phantom: PhantomData<(T1, T2)>,
}

impl<F, T1, T2> RouteHandler for TwoPathHandler<F, T1, T2>
where
	F: Fn(&NavigationState, Path<T1>, Path<T2>),
	T1: SingleFromPath,
	T2: SingleFromPath,
{
	fn handle(&self, state: &NavigationState, params: &ParamContext) -> Result<(), RouterError> {
		let first = T1::from_path_at(params, 0)?;
		let second = T2::from_path_at(params, 1)?;
		(self.handler)(state, Path(first), Path(second));
		Ok(())
	}
}

pub(crate) fn positional_handler<F>(handler: F) -> Rc<dyn RouteHandler>
where
	F: Fn(&NavigationState, &[String]) + 'static,
{
	Rc::new(PositionalHandler { handler })
}

pub(crate) fn fallible_handler<F, E>(handler: F) -> Rc<dyn RouteHandler>
where
	F: Fn(&NavigationState, &[String]) -> Result<(), E> + 'static,
	E: Into<HandlerError> + 'static,
{
	Rc::new(FallibleHandler {
		handler,
		_phantom: PhantomData,
	})
}

pub(crate) fn with_params_handler<F, T>(handler: F) -> Rc<dyn RouteHandler>
where
	F: Fn(&NavigationState, Path<T>) + 'static,
	T: FromPath + 'static,
{
	Rc::new(WithParamsHandler {
		handler,
		_phantom: PhantomData,
	})
}

pub(crate) fn single_path_handler<F, T>(handler: F) -> Rc<dyn RouteHandler>
where
	F: Fn(&NavigationState, Path<T>) + 'static,
	T: SingleFromPath + 'static,
{
	Rc::new(SinglePathHandler {
		handler,
		_phantom: PhantomData,
	})
}

pub(crate) fn two_path_handler<F, T1, T2>(handler: F) -> Rc<dyn RouteHandler>
where
	F: Fn(&NavigationState, Path<T1>, Path<T2>) + 'static,
	T1: SingleFromPath + 'static,
	T2: SingleFromPath + 'static,
{
	Rc::new(TwoPathHandler {
		handler,
		_phantom: PhantomData,
	})
}
