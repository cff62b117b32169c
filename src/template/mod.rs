//! Templating code.
//!
//! This defines the [`Page`] item, which wraps every rendered page in the
//! site chrome (navbar with the division standings, match schedule and
//! Stableford links, plus the login state).

use hypertext::prelude::*;

use crate::{auth::User, engine::Division};

pub struct Page<R: Renderable, const TX: bool> {
    body: Option<R>,
    user: Option<User<TX>>,
}

impl<R: Renderable, const TX: bool> Page<R, TX> {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn body(mut self, body: R) -> Self {
        self.body = Some(body);
        self
    }

    pub fn user(mut self, user: User<TX>) -> Self {
        self.user = Some(user);
        self
    }

    pub fn user_opt(mut self, user: Option<User<TX>>) -> Self {
        self.user = user;
        self
    }
}

impl<R: Renderable, const TX: bool> Renderable for Page<R, TX> {
    fn render_to(
        &self,
        buffer: &mut hypertext::Buffer<hypertext::context::Node>,
    ) {
        maud! {
            html {
                head {
                    title { "Patron's Cup" }
                    link
                        href="https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css"
                        rel="stylesheet"
                        integrity="sha384-QWTKZyjpPEjISv5WaRU9OFeRpok6YctnYmDr5pNlyT2bRjXh0JMhjY6hW+ALEwIH"
                        crossorigin="anonymous";
                    meta
                        name="viewport"
                        content="width=device-width, initial-scale=1";
                }
                body class="d-flex flex-column vh-100" {
                    nav class="navbar navbar-expand"
                        style="background-color: #1e5631; display: flex; justify-content: space-between; align-items: center;"
                        data-bs-theme="dark" {
                        div class="container-fluid" style="display: flex; justify-content: space-between; align-items: center;" {
                            a class="navbar-brand text-white" href="/" {
                                "Patron's Cup"
                            }
                            ul class="navbar-nav" style="display: flex; gap: 1rem;" data-bs-theme="dark" {
                                li class="nav-item" {
                                    a class="nav-link text-white" href="/matches" {
                                        "Matches"
                                    }
                                }
                                @for division in Division::ALL {
                                    li class="nav-item" {
                                        a class="nav-link text-white"
                                          href=(format!("/standings/{}", division.as_str())) {
                                            (division.as_str())
                                        }
                                    }
                                }
                                li class="nav-item" {
                                    a class="nav-link text-white" href="/stableford" {
                                        "Nancy Millar"
                                    }
                                }
                            }
                            div {
                                ul class="navbar-nav" style="display: flex; gap: 1rem;" data-bs-theme="dark" {
                                    @if let Some(user) = &self.user {
                                        li class="nav-item" {
                                            span class="nav-link text-white" {
                                                (user.username)
                                            }
                                        }
                                    } @else {
                                        li class="nav-item" {
                                            a class="nav-link text-white" href="/login" {
                                                "Login"
                                            }
                                        }
                                        li class="nav-item" {
                                            a class="nav-link text-white" href="/register" {
                                                "Register"
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                    div class="flex-grow-1 container mt-4" {
                        @if let Some(body) = &self.body {
                            (body)
                        }
                    }
                }
            }
        }.render_to(buffer)
    }
}

impl<R: Renderable, const TX: bool> Default for Page<R, TX> {
    fn default() -> Self {
        Self {
            body: Default::default(),
            user: Default::default(),
        }
    }
}
