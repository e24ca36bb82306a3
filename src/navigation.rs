//! The navigation bar shown at the top of every page.

use maud::{Markup, html};

use crate::endpoints;

/// A link in the navigation bar.
///
/// It will change appearance if `is_current` is set to
/// `true`. Only one link should be set as active at any one time.
#[derive(Clone)]
struct Link<'a> {
    url: &'a str,
    title: &'a str,
    is_current: bool,
}

impl Link<'_> {
    fn into_html(self) -> Markup {
        let style = if self.is_current {
            "block py-2 px-3 text-white bg-blue-700 rounded-sm md:bg-transparent \
            md:text-blue-700 md:p-0 dark:text-white md:dark:text-blue-500"
        } else {
            "block py-2 px-3 text-gray-900 rounded-sm hover:bg-gray-100 \
            md:hover:bg-transparent md:border-0 md:hover:text-blue-700 md:p-0 \
            dark:text-white md:dark:hover:text-blue-500 dark:hover:bg-gray-700 \
            dark:hover:text-white md:dark:hover:bg-transparent"
        };

        html! {
            li
            {
                a
                    href=(self.url)
                    class=(style)
                    aria-current=[self.is_current.then_some("page")]
                {
                    (self.title)
                }
            }
        }
    }
}

pub struct NavBar<'a> {
    links: Vec<Link<'a>>,
}

impl NavBar<'_> {
    /// Get the navigation bar.
    ///
    /// If a link matches `active_endpoint`, then that link will be
    /// marked as active and displayed differently in the HTML.
    pub fn new(active_endpoint: &str) -> NavBar<'_> {
        let links = vec![
            Link {
                url: endpoints::DASHBOARD_VIEW,
                title: "Painel",
                is_current: active_endpoint == endpoints::DASHBOARD_VIEW,
            },
            Link {
                url: endpoints::NEW_SALE_VIEW,
                title: "Nova Venda",
                is_current: active_endpoint == endpoints::NEW_SALE_VIEW,
            },
        ];

        NavBar { links }
    }

    pub fn into_html(self) -> Markup {
        // Template adapted from https://flowbite.com/docs/components/navbar/#default-navbar
        html! {
            nav class="bg-white border-gray-200 dark:bg-gray-900"
            {
                div
                    class="max-w-screen-xl flex flex-wrap items-center justify-between mx-auto p-4"
                {
                    a
                        href=(endpoints::ROOT)
                        class="flex items-center space-x-3 rtl:space-x-reverse"
                    {
                        span
                            class="self-center text-2xl font-semibold whitespace-nowrap dark:text-white"
                        {
                            "Comissões"
                        }
                    }

                    ul
                        class="font-medium flex flex-row space-x-4 md:space-x-8 p-0 \
                        dark:border-gray-700"
                    {
                        @for link in self.links {
                            (link.into_html())
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};

    use crate::endpoints;

    use super::NavBar;

    #[test]
    fn marks_active_link() {
        let html = Html::parse_fragment(&NavBar::new(endpoints::NEW_SALE_VIEW).into_html().into_string());

        let links: Vec<_> = html
            .select(&Selector::parse("li a").unwrap())
            .map(|link| {
                (
                    link.value().attr("href").unwrap_or_default().to_owned(),
                    link.value().attr("aria-current").is_some(),
                )
            })
            .collect();

        assert_eq!(
            links,
            vec![
                (endpoints::DASHBOARD_VIEW.to_owned(), false),
                (endpoints::NEW_SALE_VIEW.to_owned(), true),
            ]
        );
    }

    #[test]
    fn unknown_endpoint_has_no_active_link() {
        let html = Html::parse_fragment(&NavBar::new("/nowhere").into_html().into_string());

        assert!(
            html.select(&Selector::parse("[aria-current]").unwrap())
                .next()
                .is_none()
        );
    }
}
