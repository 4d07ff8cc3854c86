//! # Navigator 模块
//!
//! 宿主环境提供的翻页函数。

/// 翻页接口
///
/// 由宿主实现；控制器在到达边界步骤时调用。
pub trait PageNavigator {
    /// 前往下一页
    fn advance_page(&mut self);

    /// 返回上一页
    fn retreat_page(&mut self);
}

/// 翻页请求
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageRequest {
    Next,
    Previous,
}

/// 记录翻页请求的导航器
///
/// 宿主在控制器调用返回后再取出请求并真正切换页面，
/// 避免在步骤执行过程中替换正在使用的控制器。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageLog {
    requests: Vec<PageRequest>,
}

impl PageLog {
    /// 已记录的请求
    pub fn requests(&self) -> &[PageRequest] {
        &self.requests
    }

    /// 取出并清空已记录的请求
    pub fn take(&mut self) -> Vec<PageRequest> {
        std::mem::take(&mut self.requests)
    }
}

impl PageNavigator for PageLog {
    fn advance_page(&mut self) {
        self.requests.push(PageRequest::Next);
    }

    fn retreat_page(&mut self) {
        self.requests.push(PageRequest::Previous);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_log() {
        let mut log = PageLog::default();
        log.advance_page();
        log.retreat_page();
        assert_eq!(log.requests(), &[PageRequest::Next, PageRequest::Previous]);

        assert_eq!(log.take().len(), 2);
        assert!(log.requests().is_empty());
    }
}
