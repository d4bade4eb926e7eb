use std::collections::VecDeque;

use crate::{
    api::CompanyApi,
    controller::{Action, Controller, ViewModel},
    effects::{perform, Effect},
    format::DateStyle,
};

/// Runs the controller against an API one call at a time, awaiting every
/// requested call (and any follow-up calls) before `dispatch` returns.
pub struct Session<A: CompanyApi> {
    api: A,
    controller: Controller,
}

impl<A: CompanyApi> Session<A> {
    pub fn new(api: A, dates: DateStyle) -> Self {
        Self {
            api,
            controller: Controller::new(dates),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn view(&self) -> ViewModel {
        self.controller.view()
    }

    /// Alert text when the last dispatched action failed.
    pub fn failure(&self) -> Option<&str> {
        self.controller.last_failure()
    }

    pub async fn dispatch(&mut self, action: Action) {
        let effects = self.controller.handle(action);
        self.run(effects).await;
    }

    async fn run(&mut self, effects: Vec<Effect>) {
        let mut queue = VecDeque::from(effects);
        while let Some(effect) = queue.pop_front() {
            match effect {
                Effect::Call(call) => {
                    let completion = perform(&self.api, call).await;
                    queue.extend(self.controller.complete(completion));
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
